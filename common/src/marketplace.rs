//! Session state behind the app screens.
//!
//! Wires an injected repository to the role cell and the nearby-listings
//! cache. Every donate/claim is followed by an invalidate + re-fetch, so
//! the cache always reflects the store after a mutation.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::listing::{DonationForm, FormError, ListingId, MapMarker};
use crate::location::{GeoLocation, NAIROBI};
use crate::notify::{Notifier, Severity};
use crate::query::{ListingQuery, QueryState};
use crate::repository::{ClaimOutcome, ListingRepository, RepositoryError};
use crate::role::{Role, RoleState, Screen};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct Marketplace<N: Notifier> {
    repo: Arc<dyn ListingRepository>,
    notifier: N,
    role: RoleState,
    query: ListingQuery,
    origin: GeoLocation,
    radius_km: f64,
}

impl<N: Notifier> Marketplace<N> {
    pub fn new(repo: Arc<dyn ListingRepository>, notifier: N) -> Self {
        Self {
            repo,
            notifier,
            role: RoleState::default(),
            query: ListingQuery::new(),
            origin: NAIROBI,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }

    pub fn with_area(mut self, origin: GeoLocation, radius_km: f64) -> Self {
        self.origin = origin;
        self.radius_km = radius_km;
        self
    }

    pub fn with_role(mut self, role: RoleState) -> Self {
        self.role = role;
        self
    }

    pub fn role(&self) -> Role {
        self.role.current()
    }

    pub fn toggle_role(&self) -> Role {
        let role = self.role.toggle();
        debug!("Switched to {} mode", role.label());
        role
    }

    pub fn screens(&self) -> &'static [Screen] {
        self.role().screens()
    }

    pub fn query(&self) -> &QueryState {
        self.query.state()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Manual pull-to-refresh.
    pub async fn refresh(&mut self) -> &QueryState {
        self.query
            .refresh(self.repo.as_ref(), self.origin, self.radius_km)
            .await
    }

    /// Map pins for the currently loaded listings.
    pub fn markers(&self) -> Vec<MapMarker> {
        self.query
            .listings()
            .map(|xs| xs.iter().map(|l| l.marker()).collect())
            .unwrap_or_default()
    }

    /// Post a donation. Invalid forms never reach the repository.
    pub async fn donate(&mut self, form: DonationForm) -> Result<ListingId, MarketplaceError> {
        let listing = match form.into_listing() {
            Ok(listing) => listing,
            Err(e) => {
                self.notifier.notify(&e.to_string(), Severity::Error);
                return Err(e.into());
            }
        };
        let id = listing.id.clone();
        let title = listing.title.clone();

        let result = self.repo.donate(listing).await;
        match &result {
            Ok(()) => self
                .notifier
                .notify(&format!("Donation \"{title}\" posted"), Severity::Success),
            Err(e) => self
                .notifier
                .notify(&format!("Could not post donation: {e}"), Severity::Error),
        }
        self.refresh().await;
        result?;
        Ok(id)
    }

    /// Request pickup of a listing.
    pub async fn claim(&mut self, id: &ListingId) -> Result<ClaimOutcome, MarketplaceError> {
        let result = self.repo.claim(id).await;
        match &result {
            Ok(ClaimOutcome::Claimed) => self
                .notifier
                .notify("Pickup requested", Severity::Success),
            Ok(ClaimOutcome::AlreadyClaimed) => self
                .notifier
                .notify("Someone already claimed this listing", Severity::Error),
            Ok(ClaimOutcome::NotFound) => self
                .notifier
                .notify("This listing no longer exists", Severity::Error),
            Err(e) => self
                .notifier
                .notify(&format!("Could not request pickup: {e}"), Severity::Error),
        }
        self.refresh().await;
        Ok(result?)
    }
}
