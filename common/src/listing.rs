use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::location::GeoLocation;

/// Unique listing identifier. Opaque; new donations get a UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single food donation offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodListing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Informational only; nothing sweeps expired listings.
    pub expires_at: DateTime<Utc>,
    pub location: GeoLocation,
    pub donor: String,
    pub available: bool,
}

impl FoodListing {
    /// Copy of this listing with availability cleared. The id is preserved.
    pub fn claimed(&self) -> Self {
        Self {
            available: false,
            ..self.clone()
        }
    }

    pub fn marker(&self) -> MapMarker {
        MapMarker {
            id: self.id.clone(),
            location: self.location,
            title: self.title.clone(),
        }
    }
}

/// Data handed to the map surface: one tappable pin per listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: ListingId,
    pub location: GeoLocation,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("title is required")]
    MissingTitle,
    #[error("description is required")]
    MissingDescription,
}

/// What a donor fills in on the donate screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationForm {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub location: GeoLocation,
    pub donor: String,
}

impl DonationForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(FormError::MissingDescription);
        }
        Ok(())
    }

    /// Validate the form and build an available listing under `id`.
    pub fn into_listing_with_id(self, id: ListingId) -> Result<FoodListing, FormError> {
        self.validate()?;
        Ok(FoodListing {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            expires_at: self.expires_at,
            location: self.location,
            donor: self.donor,
            available: true,
        })
    }

    pub fn into_listing(self) -> Result<FoodListing, FormError> {
        self.into_listing_with_id(ListingId::generate())
    }
}
