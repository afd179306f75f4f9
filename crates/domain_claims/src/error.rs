//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Claim already resolved as {current}")]
    AlreadyResolved { current: String },

    #[error("You have already submitted a claim for this item")]
    DuplicateClaim,

    #[error("A justification is required")]
    EmptyJustification,

    #[error("Item was already claimed through another approved claim")]
    ItemUnavailable,

    #[error("Invalid decision: {0}")]
    InvalidDecision(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
