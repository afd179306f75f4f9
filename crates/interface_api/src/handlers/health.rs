//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

fn health(status: &'static str) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "lostfound-api",
        status,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    health("healthy")
}

/// Readiness probe; verifies the database answers
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(health("ready"))
}
