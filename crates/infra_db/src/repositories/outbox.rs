//! Notification outbox repository
//!
//! The outbox is written inside the resolution transaction and drained by
//! the mail dispatcher afterwards. Its rows double as the durable audit
//! trail of every delivery attempt: attempt count, outcome, and the last
//! error stay on the row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{ClaimId, NotificationId};

use crate::error::DatabaseError;

/// Delivery state of an outbox entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "outbox_status", rename_all = "lowercase")]
pub enum OutboxStatus {
    /// Queued, or failed with attempts remaining
    Pending,
    /// Delivered
    Sent,
    /// Attempt budget exhausted
    Failed,
}

/// Repository for the notification outbox
#[derive(Debug, Clone)]
pub struct OutboxRepository {
    pool: PgPool,
}

impl OutboxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a batch of entries due for delivery, oldest first
    pub async fn fetch_due(
        &self,
        limit: i64,
        max_attempts: i32,
    ) -> Result<Vec<OutboxRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, OutboxRow>(
            r#"
            SELECT id, message_id, claim_id, recipient, subject, body,
                   status, attempts, last_error, created_at, sent_at
            FROM notification_outbox
            WHERE status = 'pending' AND attempts < $2
            ORDER BY created_at
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(max_attempts)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Records a successful delivery attempt
    pub async fn mark_sent(&self, id: NotificationId) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE notification_outbox
            SET status = 'sent', attempts = attempts + 1, last_error = NULL, sent_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records a failed delivery attempt
    ///
    /// The entry stays `pending` until the attempt budget is exhausted,
    /// then flips to `failed` and is no longer picked up.
    pub async fn mark_failed(
        &self,
        id: NotificationId,
        error: &str,
        max_attempts: i32,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE notification_outbox
            SET attempts = attempts + 1,
                last_error = $2,
                status = CASE WHEN attempts + 1 >= $3 THEN 'failed'::outbox_status
                              ELSE 'pending'::outbox_status END
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .bind(max_attempts)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Database row for an outbox entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutboxRow {
    pub id: NotificationId,
    pub message_id: Uuid,
    pub claim_id: ClaimId,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: OutboxStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}
