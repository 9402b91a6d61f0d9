//! Compiled-in default site document.
//!
//! Written to an empty store on first boot and used as the merge base when
//! reconciling an existing document at startup.

use serde_json::{json, Value};

/// Storage key of the site document.
pub const SITE_CONFIG_KEY: &str = "site_config";

const WHATSAPP_LINK: &str = "https://api.whatsapp.com/send?phone=213558620107";

/// The default document, with keys in display order.
pub fn default_document() -> Value {
    json!({
        "branding": {
            "brandName": "Mr Burger",
            "tagline": "Delicious burgers, fast delivery, always fresh!",
            "logoUrl": "https://images.unsplash.com/photo-1594212699903-ec8a3eca50f5?auto=format&fit=crop&q=80&w=100",
            "faviconUrl": "https://images.unsplash.com/photo-1594212699903-ec8a3eca50f5?auto=format&fit=crop&q=80&w=32"
        },
        "hero": {
            "ctaText": "Order Now",
            "ctaLink": WHATSAPP_LINK,
            "bgImage": "https://images.unsplash.com/photo-1550547660-d9450f859349?auto=format&fit=crop&q=80&w=1920"
        },
        "about": {
            "story": "At Mr Burger, we believe in fresh ingredients, fast service, and the best taste in Constantine. Our goal is to satisfy every burger lover with quality and speed.",
            "values": [
                "Fresh, high-quality ingredients",
                "Fast delivery and service",
                "Affordable prices",
                "Friendly staff"
            ],
            "showTestimonials": true,
            "testimonials": [
                {
                    "id": 1,
                    "name": "Ahmed B.",
                    "comment": "Best burgers in town! Fast delivery and amazing taste.",
                    "rating": 5,
                    "image": "https://i.pravatar.cc/150?u=ahmed"
                },
                {
                    "id": 2,
                    "name": "Sara T.",
                    "comment": "I love Mr Burger's combos, great value for money.",
                    "rating": 5,
                    "image": "https://i.pravatar.cc/150?u=sara"
                }
            ]
        },
        "promotion": {
            "show": true,
            "title": "Combo of the Week",
            "description": "Get any burger with fries and a drink for only 1500 DZD!",
            "image": "https://images.unsplash.com/photo-1594212699903-ec8a3eca50f5?auto=format&fit=crop&q=80&w=800",
            "startDate": "2026-03-01",
            "endDate": "2026-03-07",
            "ctaText": "Order Now",
            "ctaLink": WHATSAPP_LINK
        },
        "contact": {
            "whatsapp": WHATSAPP_LINK,
            "phone": "+213 558 62 01 07",
            "email": "info@mrburger.dz",
            "address": "123 Main Street, Constantine, Algeria",
            "mapsCoords": "36.3650,6.6147",
            "socials": {
                "instagram": "https://instagram.com/mrburger",
                "facebook": "https://facebook.com/mrburger",
                "tiktok": "https://tiktok.com/@mrburger"
            }
        },
        "menu": [
            menu_item(1, "Burger", "Classic Cheeseburger", "Juicy beef patty with cheddar, lettuce, tomato", 1200, "photo-1568901346375-23c9450c58cd"),
            menu_item(2, "Burger", "Double Bacon Burger", "Double beef, crispy bacon, special sauce", 1600, "photo-1553979459-d2229ba7433b"),
            menu_item(3, "Burger", "Veggie Delight", "Grilled veggies, fresh lettuce, tomato", 1000, "photo-1525059696034-4967a8e1dca2"),
            menu_item(4, "Side", "French Fries", "Crispy golden fries", 500, "photo-1573080496219-bb080dd4f877"),
            menu_item(5, "Side", "Onion Rings", "Crispy battered onion rings", 600, "photo-1639024471283-03518883512d"),
            menu_item(6, "Drink", "Cola", "330ml chilled soda", 200, "photo-1622483767028-3f66f32aef97"),
            menu_item(7, "Drink", "Fresh Juice", "Orange or mango freshly squeezed", 400, "photo-1613478223719-2ab802602423"),
            menu_item(8, "Combo", "Burger + Fries + Drink", "Any burger + fries + drink", 1700, "photo-1534790566855-4cb788d389ec")
        ]
    })
}

fn menu_item(
    id: i64,
    category: &str,
    name: &str,
    description: &str,
    price: i64,
    photo: &str,
) -> Value {
    json!({
        "id": id,
        "category": category,
        "name": name,
        "description": description,
        "price": price,
        "image": format!("https://images.unsplash.com/{}?auto=format&fit=crop&q=80&w=800", photo)
    })
}
