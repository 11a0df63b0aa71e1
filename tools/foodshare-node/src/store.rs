//! Listing store shared by every client of the node.
//!
//! Unlike the single-actor in-memory store, requests here arrive
//! concurrently. Each listing sits in its own dashmap entry and a claim
//! flips availability while holding that entry's write guard, so of any
//! number of racing claims exactly one sees `Claimed`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use foodshare_common::listing::{FoodListing, ListingId};
use foodshare_common::location::GeoLocation;
use foodshare_common::repository::{ClaimOutcome, ListingRepository, RadiusPolicy, RepositoryError};
use foodshare_common::seed::seed_listings;

struct Slot {
    /// Insertion order; higher is newer.
    seq: u64,
    listing: FoodListing,
}

pub struct SharedListingStore {
    slots: DashMap<ListingId, Slot>,
    next_seq: AtomicU64,
    latency: Duration,
    radius_policy: RadiusPolicy,
}

impl SharedListingStore {
    pub fn new(latency: Duration, radius_policy: RadiusPolicy) -> Self {
        Self {
            slots: DashMap::new(),
            next_seq: AtomicU64::new(0),
            latency,
            radius_policy,
        }
    }

    /// A store holding the three seed listings in their usual order.
    pub fn seeded(latency: Duration, radius_policy: RadiusPolicy) -> Self {
        let store = Self::new(latency, radius_policy);
        // oldest first so the first seed listing ends up on top
        for listing in seed_listings(Utc::now()).into_iter().rev() {
            store.insert(listing);
        }
        store
    }

    fn insert(&self, listing: FoodListing) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.slots.insert(listing.id.clone(), Slot { seq, listing });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.listing.available).count()
    }

    pub fn get(&self, id: &ListingId) -> Option<FoodListing> {
        self.slots.get(id).map(|s| s.listing.clone())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait::async_trait]
impl ListingRepository for SharedListingStore {
    async fn list_nearby(
        &self,
        origin: GeoLocation,
        radius_km: f64,
    ) -> Result<Vec<FoodListing>, RepositoryError> {
        self.simulate_latency().await;

        let mut nearby: Vec<(u64, FoodListing)> = self
            .slots
            .iter()
            .filter(|s| s.listing.available && self.radius_policy.admits(&s.listing, &origin, radius_km))
            .map(|s| (s.seq, s.listing.clone()))
            .collect();
        nearby.sort_by(|a, b| b.0.cmp(&a.0));
        debug!("Listed {} of {} listings", nearby.len(), self.slots.len());
        Ok(nearby.into_iter().map(|(_, l)| l).collect())
    }

    async fn donate(&self, listing: FoodListing) -> Result<(), RepositoryError> {
        self.simulate_latency().await;

        match self.slots.entry(listing.id.clone()) {
            Entry::Occupied(_) => {
                warn!("Listing {} already exists. Ignoring donation.", listing.id);
                Err(RepositoryError::DuplicateId(listing.id))
            }
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                info!("Added listing {} ({}) from {}", listing.id, listing.title, listing.donor);
                vacant.insert(Slot { seq, listing });
                Ok(())
            }
        }
    }

    async fn claim(&self, id: &ListingId) -> Result<ClaimOutcome, RepositoryError> {
        self.simulate_latency().await;

        let Some(mut slot) = self.slots.get_mut(id) else {
            warn!("Listing {} not found", id);
            return Ok(ClaimOutcome::NotFound);
        };
        if !slot.listing.available {
            warn!("Listing {} already claimed", id);
            return Ok(ClaimOutcome::AlreadyClaimed);
        }
        slot.listing = slot.listing.claimed();
        info!("Claimed listing {}", id);
        Ok(ClaimOutcome::Claimed)
    }
}
