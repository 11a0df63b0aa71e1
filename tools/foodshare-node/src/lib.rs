//! HTTP node serving food listings to many clients.
//!
//! Mirrors the three repository operations:
//!
//! - `GET  /v1/listings?lat=&lon=&radius_km=` available listings, newest first
//! - `POST /v1/listings` donate; 201 with the stored listing
//! - `POST /v1/listings/{id}/claim` 200 claimed, 409 already claimed, 404 not found

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::NodeConfig;
use crate::store::SharedListingStore;

pub struct AppState {
    pub store: SharedListingStore,
}

impl AppState {
    pub fn from_config(config: &NodeConfig) -> Self {
        let store = if config.seed {
            SharedListingStore::seeded(config.latency, config.radius_policy)
        } else {
            SharedListingStore::new(config.latency, config.radius_policy)
        };
        Self { store }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/v1/listings", get(routes::list_nearby).post(routes::donate))
        .route("/v1/listings/{id}/claim", post(routes::claim))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the listener fails.
pub async fn serve(config: NodeConfig) -> anyhow::Result<()> {
    config.validate()?;
    let state = Arc::new(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(
        "Listening on {} ({} listings, {:?} policy)",
        listener.local_addr()?,
        state.store.len(),
        config.radius_policy
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
