//! Claim handlers
//!
//! Intake and the user's own list are open to any authenticated account;
//! the review queue and the resolution endpoint are admin-only, with the
//! role check ahead of any database work.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{Actor, ItemId};
use domain_claims::{Claim, ClaimError, ResolutionRequest};
use infra_db::{ClaimsRepository, DatabaseError};

use crate::dto::claims::{
    ClaimListResponse, ClaimResponse, CreateClaimRequest, ListClaimsQuery, ResolutionPayload,
    ResolveClaimRequest,
};
use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Files a claim on an item
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClaimResponse>>), ApiError> {
    let item_id = ItemId::new(request.item_id)?;
    let justification = Claim::normalize_justification(&request.justification)?;

    let claims = ClaimsRepository::new(state.pool.clone());
    let row = claims
        .create(actor.user_id, item_id, &justification)
        .await
        .map_err(|e| match e {
            DatabaseError::DuplicateEntry(_) => ClaimError::DuplicateClaim.into(),
            DatabaseError::ForeignKeyViolation(_) => {
                ApiError::NotFound("Item not found".to_string())
            }
            other => other.into(),
        })?;

    let Json(body) = ApiResponse::success(
        "Claim submitted for review",
        ClaimResponse { claim: row.into() },
    );
    Ok((StatusCode::CREATED, Json(body)))
}

/// Lists the caller's own claims
pub async fn list_my_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<ClaimListResponse>>, ApiError> {
    let claims = ClaimsRepository::new(state.pool.clone());
    let rows = claims.list_for_claimant(actor.user_id).await?;

    Ok(ApiResponse::success(
        "Your claims",
        ClaimListResponse {
            claims: rows.into_iter().map(Into::into).collect(),
        },
    ))
}

/// Admin review queue: pending claims or the decision history
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<ListClaimsQuery>,
) -> Result<Json<ApiResponse<ClaimListResponse>>, ApiError> {
    actor.require_admin()?;

    let claims = ClaimsRepository::new(state.pool.clone());
    let rows = match query.mode.as_deref() {
        None | Some("pending") => claims.list_pending().await?,
        Some("history") => claims.list_history().await?,
        Some(other) => {
            return Err(ApiError::Validation(format!(
                "Unknown review mode '{other}', expected 'pending' or 'history'"
            )))
        }
    };

    Ok(ApiResponse::success(
        "Claims",
        ClaimListResponse {
            claims: rows.into_iter().map(Into::into).collect(),
        },
    ))
}

/// Applies an admin decision to a pending claim.
///
/// Validation happens before any I/O; the transactional work lives in
/// `ClaimsRepository::resolve`. On approval the outbox dispatcher is woken
/// after commit so the notification goes out promptly, but its fate never
/// touches the response.
pub async fn resolve_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(raw_id): Path<i64>,
    Json(request): Json<ResolveClaimRequest>,
) -> Result<Json<ApiResponse<ResolutionPayload>>, ApiError> {
    actor.require_admin()?;

    let resolution_request = ResolutionRequest::parse(raw_id, &request.decision)?;
    let claims = ClaimsRepository::new(state.pool.clone());
    let resolution = claims.resolve(resolution_request).await?;

    if resolution.notification_queued {
        state.outbox.wake();
    }

    let message = if resolution.replayed {
        "Claim was already resolved".to_string()
    } else {
        format!("Claim {}", resolution_request.decision)
    };

    Ok(ApiResponse::success(message, resolution.into()))
}
