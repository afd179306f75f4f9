//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ItemId, UserId};

use crate::error::ClaimError;
use crate::resolution::ResolutionDecision;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "claim_status", rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Awaiting administrative review
    Pending,
    /// Approved; the owning item was transitioned to `claimed`
    Approved,
    /// Rejected; the owning item was left untouched
    Rejected,
}

impl ClaimStatus {
    /// Both non-pending states are terminal
    pub fn is_terminal(self) -> bool {
        self != ClaimStatus::Pending
    }
}

/// A user's assertion of ownership over an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Target item
    pub item_id: ItemId,
    /// Claiming user
    pub claimant_id: UserId,
    /// Free-text justification supplied at intake
    pub justification: String,
    /// Status
    pub status: ClaimStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Validates an intake justification, trimming surrounding whitespace
    pub fn normalize_justification(raw: &str) -> Result<String, ClaimError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClaimError::EmptyJustification);
        }
        Ok(trimmed.to_string())
    }

    /// Applies a resolution decision.
    ///
    /// Returns `Ok(true)` when the claim moved out of `pending`,
    /// `Ok(false)` when the decision replays the terminal state the claim
    /// already holds (an idempotent no-op that must not re-trigger side
    /// effects), and an error when the decision conflicts with the
    /// recorded outcome.
    pub fn resolve(&mut self, decision: ResolutionDecision) -> Result<bool, ClaimError> {
        let target = decision.terminal_status();
        if self.status == ClaimStatus::Pending {
            self.status = target;
            self.updated_at = Utc::now();
            return Ok(true);
        }
        if self.status == target {
            return Ok(false);
        }
        Err(ClaimError::AlreadyResolved {
            current: format!("{:?}", self.status).to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_claim() -> Claim {
        Claim {
            id: ClaimId::new(1).unwrap(),
            item_id: ItemId::new(42).unwrap(),
            claimant_id: UserId::new(7).unwrap(),
            justification: "my backpack".to_string(),
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_to_approved() {
        let mut claim = pending_claim();
        assert!(claim.resolve(ResolutionDecision::Approved).unwrap());
        assert_eq!(claim.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_replay_same_decision_is_noop() {
        let mut claim = pending_claim();
        claim.resolve(ResolutionDecision::Rejected).unwrap();
        assert!(!claim.resolve(ResolutionDecision::Rejected).unwrap());
        assert_eq!(claim.status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_conflicting_decision_rejected() {
        let mut claim = pending_claim();
        claim.resolve(ResolutionDecision::Approved).unwrap();
        let err = claim.resolve(ResolutionDecision::Rejected).unwrap_err();
        assert!(matches!(err, ClaimError::AlreadyResolved { .. }));
        assert_eq!(claim.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_justification_trimming() {
        assert_eq!(
            Claim::normalize_justification("  my backpack  ").unwrap(),
            "my backpack"
        );
        assert!(Claim::normalize_justification("   ").is_err());
        assert!(Claim::normalize_justification("").is_err());
    }
}
