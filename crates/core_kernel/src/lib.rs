//! Core Kernel - Foundational types for the lost-and-found system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed surrogate identifiers
//! - The authenticated actor context threaded through every operation
//! - Common error taxonomy

pub mod actor;
pub mod error;
pub mod identifiers;

pub use actor::{Actor, Role};
pub use error::CoreError;
pub use identifiers::{ClaimId, ItemId, NotificationId, UserId};
