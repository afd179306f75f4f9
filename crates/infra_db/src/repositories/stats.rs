//! Dashboard statistics queries

use sqlx::PgPool;

use core_kernel::UserId;

use crate::error::DatabaseError;

/// Read-only counters for the dashboards
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

/// Global counters shown to administrators
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct AdminStats {
    pub open_items: i64,
    pub awaiting_pickup: i64,
    pub resolved_items: i64,
    pub pending_claims: i64,
}

/// Per-user counters shown on the profile dashboard
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct UserStats {
    pub reports_filed: i64,
    pub items_recovered: i64,
    pub claims_filed: i64,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Global counts: open reports, items claimed but not yet picked up,
    /// resolved reports, and claims awaiting review
    pub async fn admin_stats(&self) -> Result<AdminStats, DatabaseError> {
        let stats = sqlx::query_as::<_, AdminStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM items WHERE status = 'open') AS open_items,
                (SELECT COUNT(*) FROM items WHERE status = 'claimed') AS awaiting_pickup,
                (SELECT COUNT(*) FROM items WHERE status = 'resolved') AS resolved_items,
                (SELECT COUNT(*) FROM claims WHERE status = 'pending') AS pending_claims
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// One user's report and claim counts
    pub async fn user_stats(&self, user_id: UserId) -> Result<UserStats, DatabaseError> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM items WHERE reporter_id = $1) AS reports_filed,
                (SELECT COUNT(*) FROM items WHERE reporter_id = $1 AND status = 'resolved') AS items_recovered,
                (SELECT COUNT(*) FROM claims WHERE claimant_id = $1) AS claims_filed
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
