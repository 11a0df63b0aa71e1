//! HTTP-backed listing repository for talking to a foodshare node.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use foodshare_common::api::{
    ClaimResponse, DonationRequest, ErrorResponse, HealthResponse, NearbyParams,
};
use foodshare_common::listing::{FoodListing, ListingId};
use foodshare_common::location::GeoLocation;
use foodshare_common::repository::{ClaimOutcome, ListingRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid node url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct HttpListingRepository {
    base: Url,
    http: reqwest::Client,
}

impl HttpListingRepository {
    pub fn new(node_url: &str) -> Result<Self, ClientError> {
        Self::with_client(node_url, reqwest::Client::new())
    }

    pub fn with_client(node_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: node_url.to_string(),
            reason,
        };
        let base = Url::parse(node_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        Ok(Self { base, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RepositoryError> {
        self.base
            .join(path)
            .map_err(|e| RepositoryError::Protocol(format!("bad path {path}: {e}")))
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint("health").map_err(|e| ClientError::InvalidUrl {
            url: self.base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.http.get(url).send().await?.error_for_status()?.json().await?)
    }
}

fn unavailable(e: reqwest::Error) -> RepositoryError {
    RepositoryError::Unavailable(e.to_string())
}

/// Pull the `{ "error": .. }` message out of a failed response.
async fn error_message(resp: reqwest::Response) -> String {
    let status = resp.status();
    match resp.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    }
}

#[async_trait]
impl ListingRepository for HttpListingRepository {
    async fn list_nearby(
        &self,
        origin: GeoLocation,
        radius_km: f64,
    ) -> Result<Vec<FoodListing>, RepositoryError> {
        let url = self.endpoint("v1/listings")?;
        let resp = self
            .http
            .get(url)
            .query(&NearbyParams::new(origin, radius_km))
            .send()
            .await
            .map_err(unavailable)?;
        if !resp.status().is_success() {
            return Err(RepositoryError::Unavailable(error_message(resp).await));
        }
        let listings: Vec<FoodListing> = resp
            .json()
            .await
            .map_err(|e| RepositoryError::Protocol(e.to_string()))?;
        debug!("Fetched {} listings", listings.len());
        Ok(listings)
    }

    async fn donate(&self, listing: FoodListing) -> Result<(), RepositoryError> {
        let url = self.endpoint("v1/listings")?;
        let id = listing.id.clone();
        let resp = self
            .http
            .post(url)
            .json(&DonationRequest::from(listing))
            .send()
            .await
            .map_err(unavailable)?;
        match resp.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(()),
            StatusCode::CONFLICT => Err(RepositoryError::DuplicateId(id)),
            StatusCode::UNPROCESSABLE_ENTITY => {
                Err(RepositoryError::Invalid(error_message(resp).await))
            }
            s if s.is_server_error() => Err(RepositoryError::Unavailable(error_message(resp).await)),
            s => Err(RepositoryError::Protocol(format!("donate returned {s}"))),
        }
    }

    async fn claim(&self, id: &ListingId) -> Result<ClaimOutcome, RepositoryError> {
        let mut url = self.endpoint("v1/listings")?;
        url.path_segments_mut()
            .map_err(|_| RepositoryError::Protocol("node url cannot take a path".to_string()))?
            .pop_if_empty()
            .push(id.as_str())
            .push("claim");
        let resp = self.http.post(url).send().await.map_err(unavailable)?;
        match resp.status() {
            StatusCode::OK | StatusCode::CONFLICT | StatusCode::NOT_FOUND => {
                let body: ClaimResponse = resp
                    .json()
                    .await
                    .map_err(|e| RepositoryError::Protocol(e.to_string()))?;
                Ok(body.outcome)
            }
            s if s.is_server_error() => Err(RepositoryError::Unavailable(error_message(resp).await)),
            s => Err(RepositoryError::Protocol(format!("claim returned {s}"))),
        }
    }
}
