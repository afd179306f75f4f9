//! Claim DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ItemId, UserId};
use domain_claims::ClaimStatus;
use domain_items::ItemType;
use infra_db::repositories::claims::{ClaimRow, ClaimSummaryRow};
use infra_db::ClaimResolution;

#[derive(Debug, Deserialize)]
pub struct CreateClaimRequest {
    pub item_id: i64,
    pub justification: String,
}

/// Review queue selector
#[derive(Debug, Default, Deserialize)]
pub struct ListClaimsQuery {
    /// `pending` (default) or `history`
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveClaimRequest {
    /// `approved` or `rejected`
    pub decision: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimPayload {
    pub id: ClaimId,
    pub item_id: ItemId,
    pub claimant_id: UserId,
    pub justification: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClaimRow> for ClaimPayload {
    fn from(row: ClaimRow) -> Self {
        Self {
            id: row.id,
            item_id: row.item_id,
            claimant_id: row.claimant_id,
            justification: row.justification,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Review queue entry joined with item and claimant identity
#[derive(Debug, Serialize)]
pub struct ClaimSummaryPayload {
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

impl From<ClaimSummaryRow> for ClaimSummaryPayload {
    fn from(row: ClaimSummaryRow) -> Self {
        Self {
            id: row.id,
            justification: row.justification,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            item_id: row.item_id,
            item_title: row.item_title,
            item_type: row.item_type,
            claimant_id: row.claimant_id,
            claimant_name: row.claimant_name,
            claimant_email: row.claimant_email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub claim: ClaimPayload,
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimSummaryPayload>,
}

#[derive(Debug, Serialize)]
pub struct ResolutionPayload {
    pub claim_id: ClaimId,
    pub item_id: ItemId,
    pub claim_status: ClaimStatus,
    /// True when this decision had already been applied earlier
    pub replayed: bool,
}

impl From<ClaimResolution> for ResolutionPayload {
    fn from(resolution: ClaimResolution) -> Self {
        Self {
            claim_id: resolution.claim_id,
            item_id: resolution.item_id,
            claim_status: resolution.status,
            replayed: resolution.replayed,
        }
    }
}
