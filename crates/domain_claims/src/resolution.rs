//! Resolution decisions
//!
//! `ResolutionDecision` is the only doorway out of `pending`: handlers parse
//! the admin's submitted decision into this closed type, so an illegal
//! target status is unrepresentable by the time the engine runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimId;

use crate::claim::ClaimStatus;
use crate::error::ClaimError;

/// Terminal decision an administrator can make on a pending claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionDecision {
    Approved,
    Rejected,
}

impl ResolutionDecision {
    /// The claim status this decision produces
    pub fn terminal_status(self) -> ClaimStatus {
        match self {
            ResolutionDecision::Approved => ClaimStatus::Approved,
            ResolutionDecision::Rejected => ClaimStatus::Rejected,
        }
    }
}

impl fmt::Display for ResolutionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionDecision::Approved => write!(f, "approved"),
            ResolutionDecision::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ResolutionDecision {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ResolutionDecision::Approved),
            "rejected" => Ok(ResolutionDecision::Rejected),
            other => Err(ClaimError::InvalidDecision(other.to_string())),
        }
    }
}

/// A validated resolution request
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest {
    pub claim_id: ClaimId,
    pub decision: ResolutionDecision,
}

impl ResolutionRequest {
    /// Validates raw request parameters before any I/O happens
    pub fn parse(raw_claim_id: i64, raw_decision: &str) -> Result<Self, ClaimError> {
        let claim_id = ClaimId::new(raw_claim_id)
            .map_err(|e| ClaimError::InvalidParameters(e.to_string()))?;
        let decision = raw_decision.parse()?;
        Ok(Self { claim_id, decision })
    }
}
