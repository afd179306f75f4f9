//! Dashboard statistics handler

use axum::{extract::State, Extension, Json};

use core_kernel::Actor;
use infra_db::StatsRepository;

use crate::dto::stats::StatsPayload;
use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Role-dependent dashboard counters: global for admins, personal otherwise
pub async fn stats(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let repository = StatsRepository::new(state.pool.clone());

    let stats = if actor.is_admin() {
        StatsPayload::Admin(repository.admin_stats().await?.into())
    } else {
        StatsPayload::User(repository.user_stats(actor.user_id).await?.into())
    };

    Ok(ApiResponse::success("Dashboard", StatsResponse { stats }))
}

#[derive(Debug, serde::Serialize)]
pub struct StatsResponse {
    pub stats: StatsPayload,
}
