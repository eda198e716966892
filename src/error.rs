/// Error taxonomy for the HTTP boundary
///
/// Every handler and workflow operation fails with an ApiError. The variant
/// decides the status code; the body is always { "error": message }.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or rule-violating input, rejected before any mutation
    #[error("{0}")]
    Validation(String),

    /// Referenced reservation or table id is absent
    #[error("{0}")]
    NotFound(String),

    /// Illegal status transition (e.g. mutating a finished reservation)
    #[error("{0}")]
    State(String),

    /// Underlying persistence failure, not locally recoverable
    #[error("database error")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::State(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Store(err) => {
                // Log the real cause, never expose it to the client
                tracing::error!("❌ Store failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result alias used by handlers and workflow operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;
