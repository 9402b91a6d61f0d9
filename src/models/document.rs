//! Site document model matching the frontend SiteConfig interface.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::IdGenerator;
use crate::errors::AppError;

/// Label of the catch-all menu filter.
pub const ALL_CATEGORIES: &str = "All";

/// Brand identity shown in the header and browser tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branding {
    pub brand_name: String,
    pub tagline: String,
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

/// Hero banner call to action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hero {
    pub cta_text: String,
    pub cta_link: String,
    pub bg_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    pub comment: String,
    /// Star rating, 1 to 5
    pub rating: i64,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub story: String,
    pub values: Vec<String>,
    pub show_testimonials: bool,
    pub testimonials: Vec<Testimonial>,
}

/// Promotion banner. Only `show` controls display; the dates are informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Promotion {
    pub show: bool,
    pub title: String,
    pub description: String,
    pub image: String,
    pub start_date: String,
    pub end_date: String,
    pub cta_text: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Socials {
    pub instagram: String,
    pub facebook: String,
    pub tiktok: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// WhatsApp deep link or number
    pub whatsapp: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    /// "lat,lng"
    pub maps_coords: String,
    pub socials: Socials,
}

/// A menu entry. `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
}

/// The whole editable site content.
///
/// Every section must be present. Inside a section, missing fields fall
/// back to empty values and unknown fields are ignored, so documents kept
/// from older releases by startup reconciliation still validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    pub branding: Branding,
    pub hero: Hero,
    pub about: About,
    pub promotion: Promotion,
    pub contact: Contact,
    pub menu: Vec<MenuItem>,
}

/// Fields for a menu item that has no id yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
}

/// Fields for a testimonial that has no id yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub name: String,
    pub comment: String,
    pub rating: i64,
    pub image: String,
}

impl SiteDocument {
    /// Check an incoming JSON payload against the document schema.
    ///
    /// Non-objects are malformed. Each section is checked on its own, so a
    /// failure lists the first shape problem of every bad section, followed
    /// by any broken id or rating invariants.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let Some(sections) = value.as_object() else {
            return Err(AppError::MalformedPayload(
                "Site document must be a JSON object".to_string(),
            ));
        };

        let mut problems = Vec::new();
        let branding = section(sections, "branding", &mut problems);
        let hero = section(sections, "hero", &mut problems);
        let about = section(sections, "about", &mut problems);
        let promotion = section(sections, "promotion", &mut problems);
        let contact = section(sections, "contact", &mut problems);
        let menu = section(sections, "menu", &mut problems);

        let (Some(branding), Some(hero), Some(about), Some(promotion), Some(contact), Some(menu)) =
            (branding, hero, about, promotion, contact, menu)
        else {
            return Err(AppError::Validation(problems));
        };

        let document = SiteDocument {
            branding,
            hero,
            about,
            promotion,
            contact,
            menu,
        };
        let problems = document.validate();
        if problems.is_empty() {
            Ok(document)
        } else {
            Err(AppError::Validation(problems))
        }
    }

    /// Invariants serde cannot express.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut seen = HashSet::new();
        for (i, item) in self.menu.iter().enumerate() {
            if !seen.insert(item.id) {
                problems.push(format!("menu[{}].id: duplicate id {}", i, item.id));
            }
            if item.price < 0 {
                problems.push(format!("menu[{}].price: must not be negative", i));
            }
        }

        let mut seen = HashSet::new();
        for (i, testimonial) in self.about.testimonials.iter().enumerate() {
            if !seen.insert(testimonial.id) {
                problems.push(format!(
                    "about.testimonials[{}].id: duplicate id {}",
                    i, testimonial.id
                ));
            }
            if !(1..=5).contains(&testimonial.rating) {
                problems.push(format!(
                    "about.testimonials[{}].rating: {} is outside 1-5",
                    i, testimonial.rating
                ));
            }
        }

        problems
    }

    /// Menu filter labels: "All", then each category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for item in &self.menu {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Menu items shown under a filter label.
    pub fn menu_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> {
        self.menu
            .iter()
            .filter(move |item| category == ALL_CATEGORIES || item.category == category)
    }

    /// Append a menu item with a fresh id and return that id.
    pub fn add_menu_item(&mut self, ids: &IdGenerator, item: NewMenuItem) -> i64 {
        let id = ids.next_unused(|id| self.menu.iter().any(|m| m.id == id));
        self.menu.push(MenuItem {
            id,
            category: item.category,
            name: item.name,
            description: item.description,
            price: item.price,
            image: item.image,
        });
        id
    }

    /// Append a testimonial with a fresh id and return that id.
    pub fn add_testimonial(&mut self, ids: &IdGenerator, testimonial: NewTestimonial) -> i64 {
        let testimonials = &mut self.about.testimonials;
        let id = ids.next_unused(|id| testimonials.iter().any(|t| t.id == id));
        testimonials.push(Testimonial {
            id,
            name: testimonial.name,
            comment: testimonial.comment,
            rating: testimonial.rating,
            image: testimonial.image,
        });
        id
    }
}

/// Deserialize one top-level section, recording why it failed.
fn section<T: DeserializeOwned>(
    sections: &Map<String, Value>,
    name: &str,
    problems: &mut Vec<String>,
) -> Option<T> {
    let Some(value) = sections.get(name) else {
        problems.push(format!("{}: missing section", name));
        return None;
    };
    match T::deserialize(value) {
        Ok(section) => Some(section),
        Err(e) => {
            problems.push(format!("{}: {}", name, e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_document;
    use serde_json::json;

    fn sample() -> SiteDocument {
        SiteDocument::from_value(&default_document()).unwrap()
    }

    #[test]
    fn test_default_document_is_valid() {
        let document = sample();
        assert_eq!(document.branding.brand_name, "Mr Burger");
        assert_eq!(document.menu.len(), 8);
        assert!(document.validate().is_empty());
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = SiteDocument::from_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_PAYLOAD");

        let err = SiteDocument::from_value(&json!("hello")).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_PAYLOAD");
    }

    #[test]
    fn test_missing_section_fails_validation() {
        let mut value = default_document();
        value.as_object_mut().unwrap().remove("contact");

        let err = SiteDocument::from_value(&value).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.message().contains("contact"));
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let mut value = default_document();
        value["hero"]["subtitle"] = json!("extra");
        value["branding"]["slogan"] = json!("Since 2019");
        value["legacy"] = json!({ "kept": true });

        let document = SiteDocument::from_value(&value).unwrap();
        assert_eq!(document.branding.brand_name, "Mr Burger");
    }

    #[test]
    fn test_reconciled_older_document_validates() {
        let default = default_document();
        let mut stored = default_document();
        stored["about"].as_object_mut().unwrap().remove("showTestimonials");
        stored["branding"]["slogan"] = json!("Since 2019");
        stored["legacy"] = json!(1);

        let merged = Value::Object(crate::reconcile::merge_documents(
            default.as_object().unwrap(),
            stored.as_object().unwrap(),
        ));

        let document = SiteDocument::from_value(&merged).unwrap();
        assert!(!document.about.show_testimonials);
    }

    #[test]
    fn test_every_bad_section_is_reported() {
        let mut value = default_document();
        value["hero"]["ctaText"] = json!(42);
        value["promotion"]["show"] = json!("yes");
        value.as_object_mut().unwrap().remove("menu");

        let err = SiteDocument::from_value(&value).unwrap_err();
        let AppError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 3);
        assert!(problems[0].starts_with("hero: "));
        assert!(problems[1].starts_with("promotion: "));
        assert_eq!(problems[2], "menu: missing section");
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut value = default_document();
        value["branding"].as_object_mut().unwrap().remove("faviconUrl");
        value["contact"].as_object_mut().unwrap().remove("email");

        let document = SiteDocument::from_value(&value).unwrap();
        assert!(document.branding.favicon_url.is_none());
        assert!(document.contact.email.is_none());
    }

    #[test]
    fn test_duplicate_ids_and_bad_rating() {
        let mut value = default_document();
        value["menu"][1]["id"] = value["menu"][0]["id"].clone();
        value["about"]["testimonials"][0]["rating"] = json!(6);

        let err = SiteDocument::from_value(&value).unwrap_err();
        let AppError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("menu[1].id"));
        assert!(problems[1].contains("outside 1-5"));
    }

    #[test]
    fn test_fractional_price_is_rejected() {
        let mut value = default_document();
        value["menu"][0]["price"] = json!(12.5);

        assert!(SiteDocument::from_value(&value).is_err());
    }

    #[test]
    fn test_categories_are_derived_in_order() {
        let document = sample();
        assert_eq!(
            document.categories(),
            vec!["All", "Burger", "Side", "Drink", "Combo"]
        );
        assert_eq!(document.menu_in_category("Side").count(), 2);
        assert_eq!(document.menu_in_category(ALL_CATEGORIES).count(), 8);
        assert_eq!(document.menu_in_category("Dessert").count(), 0);
    }

    #[test]
    fn test_rapid_additions_get_distinct_ids() {
        let mut document = sample();
        let ids = IdGenerator::new();

        let item = NewMenuItem {
            category: "Dessert".to_string(),
            name: "Brownie".to_string(),
            description: "Warm chocolate brownie".to_string(),
            price: 450,
            image: "https://example.com/brownie.jpg".to_string(),
        };
        let first = document.add_menu_item(&ids, item.clone());
        let second = document.add_menu_item(&ids, item);

        assert_ne!(first, second);
        assert!(document.validate().is_empty());
        assert_eq!(document.categories().last().unwrap(), "Dessert");
    }

    #[test]
    fn test_added_testimonial_avoids_existing_ids() {
        let mut document = sample();
        let ids = IdGenerator::new();
        let taken = ids.next() + 1;
        document.about.testimonials[0].id = taken;

        let id = document.add_testimonial(
            &ids,
            NewTestimonial {
                name: "Nadia K.".to_string(),
                comment: "Great fries.".to_string(),
                rating: 4,
                image: "https://i.pravatar.cc/150?u=nadia".to_string(),
            },
        );

        assert_ne!(id, taken);
        assert_eq!(document.about.testimonials.len(), 3);
        assert!(document.validate().is_empty());
    }
}
