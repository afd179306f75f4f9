//! Claims Domain
//!
//! A claim is a user's assertion of ownership over a reported item. It is
//! created `pending` and leaves that state exactly once, through the
//! resolution engine:
//!
//! ```text
//! pending -> approved
//!         -> rejected
//! ```
//!
//! Both outcomes are terminal. Approval additionally transitions the owning
//! item to `claimed` and queues a notification to the claimant; both effects
//! are applied in the same database transaction by
//! `infra_db::ClaimsRepository::resolve`.

pub mod claim;
pub mod error;
pub mod notification;
pub mod resolution;

pub use claim::{Claim, ClaimStatus};
pub use error::ClaimError;
pub use notification::ClaimNotification;
pub use resolution::{ResolutionDecision, ResolutionRequest};
