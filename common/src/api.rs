//! Wire types shared by the node and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::{DonationForm, FoodListing, ListingId};
use crate::location::{GeoLocation, NAIROBI};
use crate::marketplace::DEFAULT_RADIUS_KM;
use crate::repository::ClaimOutcome;

/// Query string of `GET /v1/listings`. Missing values fall back to the
/// Nairobi default area.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
}

impl NearbyParams {
    pub fn new(origin: GeoLocation, radius_km: f64) -> Self {
        Self {
            lat: Some(origin.latitude),
            lon: Some(origin.longitude),
            radius_km: Some(radius_km),
        }
    }

    pub fn origin(&self) -> GeoLocation {
        GeoLocation::new(
            self.lat.unwrap_or(NAIROBI.latitude),
            self.lon.unwrap_or(NAIROBI.longitude),
        )
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km.unwrap_or(DEFAULT_RADIUS_KM)
    }
}

/// Body of `POST /v1/listings`. The node assigns an id when none is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ListingId>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub location: GeoLocation,
    pub donor: String,
}

impl DonationRequest {
    pub fn into_parts(self) -> (Option<ListingId>, DonationForm) {
        let form = DonationForm {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            expires_at: self.expires_at,
            location: self.location,
            donor: self.donor,
        };
        (self.id, form)
    }
}

impl From<FoodListing> for DonationRequest {
    fn from(listing: FoodListing) -> Self {
        Self {
            id: Some(listing.id),
            title: listing.title,
            description: listing.description,
            image_url: listing.image_url,
            expires_at: listing.expires_at,
            location: listing.location,
            donor: listing.donor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub outcome: ClaimOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub listings: usize,
    pub available: usize,
}
