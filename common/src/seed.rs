use chrono::{DateTime, Duration, Utc};

use crate::listing::{FoodListing, ListingId};
use crate::location::GeoLocation;

/// The three listings every fresh store starts with, relative to `now`.
pub fn seed_listings(now: DateTime<Utc>) -> Vec<FoodListing> {
    vec![
        FoodListing {
            id: ListingId::from("1"),
            title: "Fresh Vegetables".to_string(),
            description: "Sukuma wiki, tomatoes and onions from today's market".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1540420773420-3366772f4999".to_string()),
            expires_at: now + Duration::hours(5),
            location: GeoLocation::new(-1.2921, 36.8219),
            donor: "Green Grocers".to_string(),
            available: true,
        },
        FoodListing {
            id: ListingId::from("2"),
            title: "Bakery Surplus".to_string(),
            description: "Assorted bread and mandazi left over after closing".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1509440159596-0249088772ff".to_string()),
            expires_at: now + Duration::hours(12),
            location: GeoLocation::new(-1.2864, 36.8172),
            donor: "City Bakery".to_string(),
            available: true,
        },
        FoodListing {
            id: ListingId::from("3"),
            title: "Cooked Rice & Beans".to_string(),
            description: "Enough for about 20 plates, cooked this afternoon".to_string(),
            image_url: None,
            expires_at: now + Duration::hours(3),
            location: GeoLocation::new(-1.3001, 36.8073),
            donor: "Mama Oliech Restaurant".to_string(),
            available: true,
        },
    ]
}
