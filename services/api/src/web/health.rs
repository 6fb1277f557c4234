//! services/api/src/web/health.rs
//!
//! Liveness and readiness endpoints, outside the `/api` namespace.

use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of the liveness probe response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Liveness probe for the orchestrator. Unauthenticated.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Plain-text readiness string at the root path.
pub async fn root_handler() -> &'static str {
    "secondhand book marketplace API is running"
}
