//! services/api/src/web/extract.rs
//!
//! Custom Axum extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor whose rejection is the standard 400 envelope.
///
/// Unlike `axum::Json` it tolerates an empty body (decoded as `{}`), so
/// endpoints with only optional inputs can be called without one, and it
/// skips the content-type check the original server never enforced.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(format!("unreadable request body: {}", e)))?;

        let slice: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
        let payload = serde_json::from_slice(slice)
            .map_err(|e| ApiError::Validation(format!("invalid request body: {}", e)))?;

        Ok(Self(payload))
    }
}
