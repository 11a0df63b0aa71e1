use crate::listing::FoodListing;
use crate::location::GeoLocation;
use crate::repository::{ListingRepository, RepositoryError};

/// Last known result of a "list nearby" fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Loading,
    Loaded(Vec<FoodListing>),
    Failed(String),
}

/// Cache of the nearby listings. No polling and no retry: a failed fetch
/// stays failed until the next `invalidate`/`refresh`.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    state: QueryState,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self {
            state: QueryState::Loading,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    pub fn listings(&self) -> Option<&[FoodListing]> {
        match &self.state {
            QueryState::Loaded(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn invalidate(&mut self) {
        self.state = QueryState::Loading;
    }

    /// Record the outcome of a fetch. Ignored unless a fetch is pending.
    pub fn settle(&mut self, result: Result<Vec<FoodListing>, RepositoryError>) {
        if !self.is_loading() {
            return;
        }
        self.state = match result {
            Ok(listings) => QueryState::Loaded(listings),
            Err(e) => QueryState::Failed(e.to_string()),
        };
    }

    pub async fn refresh<R: ListingRepository + ?Sized>(
        &mut self,
        repo: &R,
        origin: GeoLocation,
        radius_km: f64,
    ) -> &QueryState {
        self.invalidate();
        let result = repo.list_nearby(origin, radius_km).await;
        self.settle(result);
        &self.state
    }
}
