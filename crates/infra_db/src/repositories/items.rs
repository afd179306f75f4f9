//! Items repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use core_kernel::{ItemId, UserId};
use domain_items::{Category, Item, ItemError, ItemStatus, ItemType};

use crate::error::DatabaseError;

/// Repository for lost/found reports
#[derive(Debug, Clone)]
pub struct ItemsRepository {
    pool: PgPool,
}

impl ItemsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new report in `open` status
    pub async fn create(&self, item: NewItem) -> Result<Item, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (reporter_id, title, description, category, item_type, location, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, reporter_id, title, description, category, item_type, status,
                      location, occurred_at, reported_at, resolved_at
            "#,
        )
        .bind(item.reporter_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.category)
        .bind(item.item_type)
        .bind(&item.location)
        .bind(item.occurred_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Retrieves a report by its identifier
    pub async fn get_by_id(&self, item_id: ItemId) -> Result<Item, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, reporter_id, title, description, category, item_type, status,
                   location, occurred_at, reported_at, resolved_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Item", item_id))?;

        Ok(row.into())
    }

    /// Lists reports newest-first, optionally filtered
    ///
    /// Free-text search covers title, description and location. Capped at
    /// 50 rows like the original listing.
    pub async fn search(&self, filter: ItemFilter) -> Result<Vec<ItemSummaryRow>, DatabaseError> {
        let pattern = filter.search.map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, ItemSummaryRow>(
            r#"
            SELECT i.id, i.title, i.description, i.category, i.item_type, i.status,
                   i.location, i.occurred_at, i.reported_at,
                   i.reporter_id, u.full_name AS reporter_name
            FROM items i
            JOIN users u ON u.id = i.reporter_id
            WHERE ($1::text IS NULL
                   OR i.title ILIKE $1 OR i.description ILIKE $1 OR i.location ILIKE $1)
              AND ($2::item_category IS NULL OR i.category = $2)
              AND ($3::item_type IS NULL OR i.item_type = $3)
              AND ($4::bigint IS NULL OR i.reporter_id = $4)
            ORDER BY i.reported_at DESC
            LIMIT 50
            "#,
        )
        .bind(pattern)
        .bind(filter.category)
        .bind(filter.item_type)
        .bind(filter.reporter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Marks a report resolved, enforcing the forward-only transition table
    ///
    /// Only the reporter (or the engine's own approval path, which goes
    /// through `ClaimsRepository::resolve` instead) may move an item
    /// forward; callers enforce authorization before invoking this.
    pub async fn mark_resolved(&self, item_id: ItemId) -> Result<Item, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, reporter_id, title, description, category, item_type, status,
                   location, occurred_at, reported_at, resolved_at
            FROM items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Item", item_id))?;

        let mut item: Item = row.into();
        item.update_status(ItemStatus::Resolved).map_err(|e| match e {
            ItemError::InvalidStatusTransition { .. } => {
                DatabaseError::ConstraintViolation(e.to_string())
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        })?;

        let updated = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items
            SET status = $2, resolved_at = now()
            WHERE id = $1
            RETURNING id, reporter_id, title, description, category, item_type, status,
                      location, occurred_at, reported_at, resolved_at
            "#,
        )
        .bind(item_id)
        .bind(ItemStatus::Resolved)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated.into())
    }
}

/// Database row for an item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
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

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            reporter_id: row.reporter_id,
            title: row.title,
            description: row.description,
            category: row.category,
            item_type: row.item_type,
            status: row.status,
            location: row.location,
            occurred_at: row.occurred_at,
            reported_at: row.reported_at,
            resolved_at: row.resolved_at,
        }
    }
}

/// Listing row joined with the reporter's name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemSummaryRow {
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

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct NewItem {
    pub reporter_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub item_type: ItemType,
    pub location: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Optional listing filters
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub item_type: Option<ItemType>,
    pub reporter_id: Option<UserId>,
}
