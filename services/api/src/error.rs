//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and its mapping
//! onto the uniform response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::config::ConfigError;
use bookmarket_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller-supplied data was missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents an error that propagated up from the storage port.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying MongoDB driver.
    #[error("Database Error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every error leaves the process as a well-formed `{success:false, message}`
/// body; the HTTP status carries the class of the outcome.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Port(e) => {
                tracing::error!("storage failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            other => {
                tracing::error!("internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
