//! Claims repository implementation
//!
//! Covers claim intake, the administrator review queue, and the resolution
//! transaction - the one place in the system that moves a claim out of
//! `pending`, transitions the owning item, and queues the approval
//! notification, all-or-nothing.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use core_kernel::{ClaimId, ItemId, UserId};
use domain_claims::{ClaimError, ClaimNotification, ClaimStatus, ResolutionDecision};
use domain_claims::resolution::ResolutionRequest;
use domain_items::{ItemStatus, ItemType};

use crate::error::DatabaseError;

/// Errors surfaced by the resolution engine
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for ResolutionError {
    fn from(error: sqlx::Error) -> Self {
        ResolutionError::Database(error.into())
    }
}

/// Repository for claims
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new claim in `pending` status
    ///
    /// The unique index on (claimant_id, item_id) turns a resubmission into
    /// `DatabaseError::DuplicateEntry` regardless of the earlier claim's
    /// status; a missing item surfaces as a foreign key violation.
    pub async fn create(
        &self,
        claimant_id: UserId,
        item_id: ItemId,
        justification: &str,
    ) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO claims (item_id, claimant_id, justification)
            VALUES ($1, $2, $3)
            RETURNING id, item_id, claimant_id, justification, status, created_at, updated_at
            "#,
        )
        .bind(item_id)
        .bind(claimant_id)
        .bind(justification)
        .fetch_one(&self.pool)
        .await?;

        info!(claim_id = %row.id, item_id = %item_id, claimant_id = %claimant_id, "Claim created");
        Ok(row)
    }

    /// Pending review queue: claims awaiting a decision, newest-first by
    /// creation time, joined with their item and claimant identity
    pub async fn list_pending(&self) -> Result<Vec<ClaimSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimSummaryRow>(
            r#"
            SELECT c.id, c.justification, c.status, c.created_at, c.updated_at,
                   i.id AS item_id, i.title AS item_title, i.item_type,
                   u.id AS claimant_id, u.full_name AS claimant_name, u.email AS claimant_email
            FROM claims c
            JOIN items i ON i.id = c.item_id
            JOIN users u ON u.id = c.claimant_id
            WHERE c.status = 'pending'
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Review history: all decided claims, newest-first by decision time
    pub async fn list_history(&self) -> Result<Vec<ClaimSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimSummaryRow>(
            r#"
            SELECT c.id, c.justification, c.status, c.created_at, c.updated_at,
                   i.id AS item_id, i.title AS item_title, i.item_type,
                   u.id AS claimant_id, u.full_name AS claimant_name, u.email AS claimant_email
            FROM claims c
            JOIN items i ON i.id = c.item_id
            JOIN users u ON u.id = c.claimant_id
            WHERE c.status <> 'pending'
            ORDER BY c.updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Claims filed by one user, for the profile view
    pub async fn list_for_claimant(
        &self,
        claimant_id: UserId,
    ) -> Result<Vec<ClaimSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimSummaryRow>(
            r#"
            SELECT c.id, c.justification, c.status, c.created_at, c.updated_at,
                   i.id AS item_id, i.title AS item_title, i.item_type,
                   u.id AS claimant_id, u.full_name AS claimant_name, u.email AS claimant_email
            FROM claims c
            JOIN items i ON i.id = c.item_id
            JOIN users u ON u.id = c.claimant_id
            WHERE c.claimant_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(claimant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Resolves a pending claim - the core transaction.
    ///
    /// Within a single transaction, with the claim and item rows locked:
    /// 1. the claim's status moves to the requested terminal value;
    /// 2. iff approved, the item's status moves to `claimed`;
    /// 3. iff approved, the rendered notification is inserted into the
    ///    outbox for the dispatcher to deliver after commit.
    ///
    /// Replaying the decision a terminal claim already holds is a no-op
    /// (`replayed = true`, nothing queued); a conflicting decision fails
    /// with `ClaimError::AlreadyResolved`. Any persistence failure rolls
    /// the whole unit back.
    pub async fn resolve(
        &self,
        request: ResolutionRequest,
    ) -> Result<ClaimResolution, ResolutionError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let target = sqlx::query_as::<_, ResolutionTargetRow>(
            r#"
            SELECT c.id AS claim_id, c.status AS claim_status,
                   i.id AS item_id, i.status AS item_status, i.title AS item_title,
                   u.full_name AS claimant_name, u.email AS claimant_email
            FROM claims c
            JOIN items i ON i.id = c.item_id
            JOIN users u ON u.id = c.claimant_id
            WHERE c.id = $1
            FOR UPDATE OF c, i
            "#,
        )
        .bind(request.claim_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ClaimError::ClaimNotFound(request.claim_id.to_string()))?;

        let new_status = request.decision.terminal_status();

        if target.claim_status.is_terminal() {
            if target.claim_status == new_status {
                // Idempotent replay: nothing to change, nothing to queue.
                tx.commit().await?;
                info!(claim_id = %request.claim_id, status = ?target.claim_status, "Resolution replay ignored");
                return Ok(ClaimResolution {
                    claim_id: target.claim_id,
                    item_id: target.item_id,
                    status: target.claim_status,
                    replayed: true,
                    notification_queued: false,
                });
            }
            warn!(claim_id = %request.claim_id, current = ?target.claim_status, requested = ?new_status,
                  "Conflicting resolution on terminal claim");
            return Err(ClaimError::AlreadyResolved {
                current: format!("{:?}", target.claim_status).to_lowercase(),
            }
            .into());
        }

        if request.decision == ResolutionDecision::Approved
            && !target.item_status.can_transition_to(ItemStatus::Claimed)
        {
            // A different claim on the same item already won.
            return Err(ClaimError::ItemUnavailable.into());
        }

        sqlx::query("UPDATE claims SET status = $2, updated_at = now() WHERE id = $1")
            .bind(request.claim_id)
            .bind(new_status)
            .execute(&mut *tx)
            .await?;

        let mut notification_queued = false;
        if request.decision == ResolutionDecision::Approved {
            sqlx::query("UPDATE items SET status = $2 WHERE id = $1")
                .bind(target.item_id)
                .bind(ItemStatus::Claimed)
                .execute(&mut *tx)
                .await?;

            let notice = ClaimNotification::approval(
                &target.claimant_name,
                &target.claimant_email,
                &target.item_title,
            );
            sqlx::query(
                r#"
                INSERT INTO notification_outbox (claim_id, recipient, subject, body)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(request.claim_id)
            .bind(&notice.recipient)
            .bind(&notice.subject)
            .bind(&notice.body)
            .execute(&mut *tx)
            .await?;
            notification_queued = true;
        }

        tx.commit().await?;

        info!(
            claim_id = %request.claim_id,
            decision = %request.decision,
            item_id = %target.item_id,
            notification_queued,
            "Claim resolved"
        );

        Ok(ClaimResolution {
            claim_id: target.claim_id,
            item_id: target.item_id,
            status: new_status,
            replayed: false,
            notification_queued,
        })
    }
}

/// Outcome of a resolution request
#[derive(Debug, Clone, Copy)]
pub struct ClaimResolution {
    pub claim_id: ClaimId,
    pub item_id: ItemId,
    pub status: ClaimStatus,
    /// True when the claim was already terminal with the same decision
    pub replayed: bool,
    /// True when an approval notice was inserted into the outbox
    pub notification_queued: bool,
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: ClaimId,
    pub item_id: ItemId,
    pub claimant_id: UserId,
    pub justification: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review queue row joined with item and claimant identity
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimSummaryRow {
    pub id: ClaimId,
    pub justification: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_id: ItemId,
    pub item_title: String,
    pub item_type: ItemType,
    pub claimant_id: UserId,
    pub claimant_name: String,
    pub claimant_email: String,
}

/// Locked snapshot the resolution transaction works from
#[derive(Debug, Clone, sqlx::FromRow)]
struct ResolutionTargetRow {
    claim_id: ClaimId,
    claim_status: ClaimStatus,
    item_id: ItemId,
    item_status: ItemStatus,
    item_title: String,
    claimant_name: String,
    claimant_email: String,
}
