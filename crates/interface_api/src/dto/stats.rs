//! Dashboard statistics DTOs

use serde::Serialize;

use infra_db::repositories::stats::{AdminStats, UserStats};

/// Global counters for the admin dashboard
#[derive(Debug, Serialize)]
pub struct AdminStatsPayload {
    pub open_items: i64,
    pub awaiting_pickup: i64,
    pub resolved_items: i64,
    pub pending_claims: i64,
}

impl From<AdminStats> for AdminStatsPayload {
    fn from(stats: AdminStats) -> Self {
        Self {
            open_items: stats.open_items,
            awaiting_pickup: stats.awaiting_pickup,
            resolved_items: stats.resolved_items,
            pending_claims: stats.pending_claims,
        }
    }
}

/// Per-user counters for the profile dashboard
#[derive(Debug, Serialize)]
pub struct UserStatsPayload {
    pub reports_filed: i64,
    pub items_recovered: i64,
    pub claims_filed: i64,
}

impl From<UserStats> for UserStatsPayload {
    fn from(stats: UserStats) -> Self {
        Self {
            reports_filed: stats.reports_filed,
            items_recovered: stats.items_recovered,
            claims_filed: stats.claims_filed,
        }
    }
}

/// The dashboard shape depends on the caller's role
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsPayload {
    Admin(AdminStatsPayload),
    User(UserStatsPayload),
}
