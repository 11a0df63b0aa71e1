use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::{FoodListing, ListingId};
use crate::location::GeoLocation;

/// Result of a claim. None of these is an error: an unknown or already
/// claimed id leaves the store untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimOutcome {
    Claimed,
    AlreadyClaimed,
    NotFound,
}

impl ClaimOutcome {
    pub fn is_claimed(self) -> bool {
        matches!(self, ClaimOutcome::Claimed)
    }
}

/// How `list_nearby` treats its origin and radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadiusPolicy {
    /// Origin and radius are accepted but every available listing is returned.
    #[default]
    ShowAll,
    /// Only listings within `radius_km` of the origin (haversine).
    WithinRadius,
}

impl RadiusPolicy {
    pub fn admits(self, listing: &FoodListing, origin: &GeoLocation, radius_km: f64) -> bool {
        match self {
            RadiusPolicy::ShowAll => true,
            RadiusPolicy::WithinRadius => listing.location.is_within(origin, radius_km),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("listing {0} already exists")]
    DuplicateId(ListingId),
    #[error("invalid listing: {0}")]
    Invalid(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// Data access for food listings.
///
/// Callers observe mutations by calling `list_nearby` again; nothing is
/// pushed.
#[async_trait::async_trait]
pub trait ListingRepository: Send + Sync {
    /// Available listings, most recent first.
    async fn list_nearby(
        &self,
        origin: GeoLocation,
        radius_km: f64,
    ) -> Result<Vec<FoodListing>, RepositoryError>;

    /// Put a new listing at the front of the ordering. The caller supplies the id.
    async fn donate(&self, listing: FoodListing) -> Result<(), RepositoryError>;

    /// Mark a listing unavailable.
    async fn claim(&self, id: &ListingId) -> Result<ClaimOutcome, RepositoryError>;
}
