//! In-memory listing store with simulated network latency.
//!
//! Listings live in a single ordered sequence, newest first. Every
//! operation sleeps before touching the sequence so loading states are
//! visible, but the sleep is a tokio timer and never blocks the thread.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::listing::{FoodListing, ListingId};
use crate::location::GeoLocation;
use crate::repository::{ClaimOutcome, ListingRepository, RadiusPolicy, RepositoryError};
use crate::seed::seed_listings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreConfig {
    pub list_latency: Duration,
    pub mutation_latency: Duration,
    pub radius_policy: RadiusPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            list_latency: Duration::from_millis(800),
            mutation_latency: Duration::from_millis(500),
            radius_policy: RadiusPolicy::ShowAll,
        }
    }
}

impl StoreConfig {
    /// No simulated latency.
    pub fn instant() -> Self {
        Self {
            list_latency: Duration::ZERO,
            mutation_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

pub struct InMemoryListingStore {
    config: StoreConfig,
    listings: RwLock<Vec<FoodListing>>,
}

impl InMemoryListingStore {
    /// A store holding the three seed listings.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_listings(config, seed_listings(Utc::now()))
    }

    /// A store holding `listings`, first element shown first.
    pub fn with_listings(config: StoreConfig, listings: Vec<FoodListing>) -> Self {
        Self {
            config,
            listings: RwLock::new(listings),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Every listing, claimed ones included.
    pub async fn snapshot(&self) -> Vec<FoodListing> {
        self.listings.read().await.clone()
    }

    pub async fn get(&self, id: &ListingId) -> Option<FoodListing> {
        self.listings.read().await.iter().find(|l| &l.id == id).cloned()
    }

    async fn simulate_latency(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for InMemoryListingStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait::async_trait]
impl ListingRepository for InMemoryListingStore {
    async fn list_nearby(
        &self,
        origin: GeoLocation,
        radius_km: f64,
    ) -> Result<Vec<FoodListing>, RepositoryError> {
        Self::simulate_latency(self.config.list_latency).await;

        let policy = self.config.radius_policy;
        let listings = self.listings.read().await;
        let nearby: Vec<FoodListing> = listings
            .iter()
            .filter(|l| l.available && policy.admits(l, &origin, radius_km))
            .cloned()
            .collect();
        debug!(
            "Listed {} of {} listings near ({}, {})",
            nearby.len(),
            listings.len(),
            origin.latitude,
            origin.longitude
        );
        Ok(nearby)
    }

    async fn donate(&self, listing: FoodListing) -> Result<(), RepositoryError> {
        Self::simulate_latency(self.config.mutation_latency).await;

        let mut listings = self.listings.write().await;
        if listings.iter().any(|l| l.id == listing.id) {
            warn!("Listing {} already exists. Ignoring donation.", listing.id);
            return Err(RepositoryError::DuplicateId(listing.id));
        }
        info!("Added listing {} ({}) from {}", listing.id, listing.title, listing.donor);
        listings.insert(0, listing);
        Ok(())
    }

    async fn claim(&self, id: &ListingId) -> Result<ClaimOutcome, RepositoryError> {
        Self::simulate_latency(self.config.mutation_latency).await;

        let mut listings = self.listings.write().await;
        let Some(slot) = listings.iter_mut().find(|l| &l.id == id) else {
            warn!("Listing {} not found", id);
            return Ok(ClaimOutcome::NotFound);
        };
        if !slot.available {
            warn!("Listing {} already claimed", id);
            return Ok(ClaimOutcome::AlreadyClaimed);
        }
        *slot = slot.claimed();
        info!("Claimed listing {}", id);
        Ok(ClaimOutcome::Claimed)
    }
}
