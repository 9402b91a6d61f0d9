//! WhatsApp order link composition.
//!
//! The server never places orders; it only builds the `wa.me` deep link the
//! page opens with the customer's message prefilled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

const WA_ME: &str = "https://wa.me/";

/// Order form submitted from the contact section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub name: String,
    pub phone: String,
    pub order: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Customer-local time, HH:MM:SS. Server time is used when absent.
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLink {
    pub url: String,
    pub message: String,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("order", &self.order),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{}: is required", field));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems))
        }
    }

    /// Plain-text message sent to the restaurant.
    pub fn message(&self, time: &str) -> String {
        format!(
            "Customer Name: {}\nCustomer Phone: {}\nOrder: {}\nTime: {}\nNotes: {}",
            self.name,
            self.phone,
            self.order,
            self.time.as_deref().unwrap_or(time),
            self.notes.as_deref().unwrap_or("")
        )
    }
}

/// Digits of the restaurant's WhatsApp number, taken from the document's
/// `contact.whatsapp` link or, failing that, `contact.phone`.
pub fn restaurant_number(document: &Value) -> Option<String> {
    let contact = document.get("contact")?;
    ["whatsapp", "phone"]
        .iter()
        .filter_map(|field| contact.get(*field).and_then(Value::as_str))
        .map(number_from)
        .find(|digits| !digits.is_empty())
}

/// Extract the phone digits from a link such as
/// `https://api.whatsapp.com/send?phone=213...`, `https://wa.me/213...`
/// or a formatted number like `+213 558 62 01 07`.
fn number_from(raw: &str) -> String {
    let relevant = if let Some((_, rest)) = raw.split_once("phone=") {
        rest.split('&').next().unwrap_or_default()
    } else if let Some((_, rest)) = raw.split_once("wa.me/") {
        rest.split(['?', '/']).next().unwrap_or_default()
    } else {
        raw
    };
    relevant.chars().filter(char::is_ascii_digit).collect()
}

pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("{}{}?text={}", WA_ME, number, urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_document;
    use serde_json::json;

    fn request() -> OrderRequest {
        OrderRequest {
            name: "Yacine".to_string(),
            phone: "0555 12 34 56".to_string(),
            order: "2x Classic Cheeseburger".to_string(),
            notes: None,
            time: None,
        }
    }

    #[test]
    fn test_number_from_variants() {
        assert_eq!(
            number_from("https://api.whatsapp.com/send?phone=213558620107&text=hi"),
            "213558620107"
        );
        assert_eq!(number_from("https://wa.me/213558620107?text=x"), "213558620107");
        assert_eq!(number_from("+213 558 62 01 07"), "213558620107");
        assert_eq!(number_from("https://example.com/contact"), "");
    }

    #[test]
    fn test_restaurant_number_from_default_document() {
        assert_eq!(
            restaurant_number(&default_document()).as_deref(),
            Some("213558620107")
        );
    }

    #[test]
    fn test_restaurant_number_falls_back_to_phone() {
        let document = json!({
            "contact": { "whatsapp": "", "phone": "+213 700 00 00 01" }
        });
        assert_eq!(restaurant_number(&document).as_deref(), Some("213700000001"));
        assert_eq!(restaurant_number(&json!({})), None);
    }

    #[test]
    fn test_message_layout() {
        let message = request().message("19:30:00");
        assert_eq!(
            message,
            "Customer Name: Yacine\nCustomer Phone: 0555 12 34 56\nOrder: 2x Classic Cheeseburger\nTime: 19:30:00\nNotes: "
        );
    }

    #[test]
    fn test_client_time_wins() {
        let mut req = request();
        req.time = Some("08:15:00".to_string());
        req.notes = Some("No onions".to_string());
        let message = req.message("19:30:00");
        assert!(message.contains("Time: 08:15:00"));
        assert!(message.ends_with("Notes: No onions"));
    }

    #[test]
    fn test_link_is_percent_encoded() {
        let link = whatsapp_link("213558620107", "Order: 2x Cola\nNotes: cold");
        assert_eq!(
            link,
            "https://wa.me/213558620107?text=Order%3A%202x%20Cola%0ANotes%3A%20cold"
        );
    }

    #[test]
    fn test_required_fields() {
        let mut req = request();
        req.order = "  ".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.message().contains("order"));
        assert!(request().validate().is_ok());
    }
}
