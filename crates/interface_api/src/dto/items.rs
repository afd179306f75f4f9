//! Item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ItemId, UserId};
use domain_items::{Category, Item, ItemStatus, ItemType};
use infra_db::repositories::items::ItemSummaryRow;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 150, message = "a title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub item_type: ItemType,
    pub location: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Listing filters, all optional
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub item_type: Option<ItemType>,
    pub reporter: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ItemPayload {
    pub id: ItemId,
    pub reporter_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub reported_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<Item> for ItemPayload {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            reporter_id: item.reporter_id,
            title: item.title,
            description: item.description,
            category: item.category,
            item_type: item.item_type,
            status: item.status,
            location: item.location,
            occurred_at: item.occurred_at,
            reported_at: item.reported_at,
            resolved_at: item.resolved_at,
        }
    }
}

/// Listing entry with the reporter's display name joined in
#[derive(Debug, Serialize)]
pub struct ItemSummaryPayload {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub item_type: ItemType,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub reported_at: DateTime<Utc>,
    pub reporter_id: UserId,
    pub reporter_name: String,
}

impl From<ItemSummaryRow> for ItemSummaryPayload {
    fn from(row: ItemSummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            item_type: row.item_type,
            status: row.status,
            location: row.location,
            occurred_at: row.occurred_at,
            reported_at: row.reported_at,
            reporter_id: row.reporter_id,
            reporter_name: row.reporter_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: ItemPayload,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemSummaryPayload>,
}
