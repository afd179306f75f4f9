//! Item handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{Actor, ItemId, UserId};
use infra_db::repositories::items::{ItemFilter, NewItem};
use infra_db::ItemsRepository;

use crate::dto::items::{
    CreateItemRequest, ItemListResponse, ItemResponse, ListItemsQuery,
};
use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Files a new lost/found report; the item starts `open`
pub async fn create_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponse>>), ApiError> {
    request.validate()?;

    let items = ItemsRepository::new(state.pool.clone());
    let item = items
        .create(NewItem {
            reporter_id: actor.user_id,
            title: request.title.trim().to_string(),
            description: request.description,
            category: request.category,
            item_type: request.item_type,
            location: request.location,
            occurred_at: request.occurred_at,
        })
        .await?;

    let Json(body) = ApiResponse::success("Item reported", ItemResponse { item: item.into() });
    Ok((StatusCode::CREATED, Json(body)))
}

/// Lists reports newest-first with optional search and filters
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<ApiResponse<ItemListResponse>>, ApiError> {
    let reporter_id = query
        .reporter
        .map(UserId::new)
        .transpose()
        .map_err(ApiError::from)?;

    let items = ItemsRepository::new(state.pool.clone());
    let rows = items
        .search(ItemFilter {
            search: query.search,
            category: query.category,
            item_type: query.item_type,
            reporter_id,
        })
        .await?;

    Ok(ApiResponse::success(
        "Items",
        ItemListResponse {
            items: rows.into_iter().map(Into::into).collect(),
        },
    ))
}

/// Retrieves one report
pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<i64>,
) -> Result<Json<ApiResponse<ItemResponse>>, ApiError> {
    let item_id = ItemId::new(raw_id)?;
    let items = ItemsRepository::new(state.pool.clone());
    let item = items.get_by_id(item_id).await?;

    Ok(ApiResponse::success(
        "Item",
        ItemResponse { item: item.into() },
    ))
}

/// Marks a report resolved; reporter or admin only
pub async fn resolve_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(raw_id): Path<i64>,
) -> Result<Json<ApiResponse<ItemResponse>>, ApiError> {
    let item_id = ItemId::new(raw_id)?;
    let items = ItemsRepository::new(state.pool.clone());

    let item = items.get_by_id(item_id).await?;
    if item.reporter_id != actor.user_id && !actor.is_admin() {
        return Err(ApiError::Forbidden(
            "Only the reporter may close this item".to_string(),
        ));
    }

    let updated = items.mark_resolved(item_id).await?;

    tracing::info!(item_id = %item_id, actor = %actor.user_id, "Item resolved");

    Ok(ApiResponse::success(
        "Item resolved",
        ItemResponse {
            item: updated.into(),
        },
    ))
}
