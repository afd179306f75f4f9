//! Item domain errors

use thiserror::Error;

/// Errors that can occur in the item domain
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Item title must not be empty")]
    EmptyTitle,
}
