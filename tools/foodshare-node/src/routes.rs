use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use foodshare_common::api::{ClaimResponse, DonationRequest, HealthResponse, NearbyParams};
use foodshare_common::listing::{FoodListing, ListingId};
use foodshare_common::repository::{ClaimOutcome, ListingRepository};

use crate::error::NodeError;
use crate::AppState;

pub async fn list_nearby(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<FoodListing>>, NodeError> {
    let listings = state
        .store
        .list_nearby(params.origin(), params.radius_km())
        .await?;
    Ok(Json(listings))
}

pub async fn donate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DonationRequest>,
) -> Result<(StatusCode, Json<FoodListing>), NodeError> {
    let (id, form) = req.into_parts();
    let listing = form.into_listing_with_id(id.unwrap_or_else(ListingId::generate))?;
    state.store.donate(listing.clone()).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

pub async fn claim(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ClaimResponse>), NodeError> {
    let outcome = state.store.claim(&ListingId(id)).await?;
    let status = match outcome {
        ClaimOutcome::Claimed => StatusCode::OK,
        ClaimOutcome::AlreadyClaimed => StatusCode::CONFLICT,
        ClaimOutcome::NotFound => StatusCode::NOT_FOUND,
    };
    Ok((status, Json(ClaimResponse { outcome })))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        listings: state.store.len(),
        available: state.store.available_count(),
    })
}
