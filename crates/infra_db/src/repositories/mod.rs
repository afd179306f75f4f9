//! Repository implementations

pub mod claims;
pub mod items;
pub mod outbox;
pub mod stats;
pub mod users;
