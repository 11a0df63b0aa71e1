use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use foodshare_common::api::ErrorResponse;
use foodshare_common::listing::FormError;
use foodshare_common::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl NodeError {
    pub fn status(&self) -> StatusCode {
        match self {
            NodeError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NodeError::Repository(RepositoryError::DuplicateId(_)) => StatusCode::CONFLICT,
            NodeError::Repository(RepositoryError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            NodeError::Repository(RepositoryError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::Repository(RepositoryError::Protocol(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
