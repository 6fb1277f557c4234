//! services/api/src/web/users.rs
//!
//! Handlers for identity and user endpoints.

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use bookmarket_core::domain::mock_openid;

use crate::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::protocol::{Envelope, OpenidDto, SaveUserPayload};
use crate::web::state::AppState;

/// Issue a mock external identity. Stands in for a real OAuth exchange.
#[utoipa::path(
    get,
    path = "/api/getOpenid",
    responses((status = 200, description = "A fresh identity", body = Envelope<OpenidDto>))
)]
pub async fn get_openid_handler() -> Json<Envelope<OpenidDto>> {
    Json(Envelope::ok(
        OpenidDto {
            openid: mock_openid(),
        },
        "fetched",
    ))
}

/// Upsert a user profile keyed on the external identity. Idempotent: calling
/// twice with the same openid leaves one stored user carrying the last
/// userInfo.
#[utoipa::path(
    post,
    path = "/api/saveUser",
    request_body = SaveUserPayload,
    responses(
        (status = 200, description = "The saved identity", body = Envelope<OpenidDto>),
        (status = 400, description = "Missing openid or userInfo")
    )
)]
pub async fn save_user_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SaveUserPayload>,
) -> Result<Json<Envelope<OpenidDto>>, ApiError> {
    if payload.openid.trim().is_empty() {
        return Err(ApiError::Validation("openid must not be empty".to_string()));
    }

    state
        .store
        .upsert_user(&payload.openid, payload.user_info)
        .await?;

    Ok(Json(Envelope::ok(
        OpenidDto {
            openid: payload.openid,
        },
        "saved",
    )))
}
