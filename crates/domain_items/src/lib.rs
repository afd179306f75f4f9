//! Item Domain
//!
//! A lost or found object report with a lifecycle status independent of
//! any claims against it:
//!
//! ```text
//! open -> claimed -> resolved
//!      \___________/
//! ```
//!
//! Transitions are forward-only. `claimed` is reachable only through the
//! claim resolution engine in `domain_claims`.

pub mod error;
pub mod item;

pub use error::ItemError;
pub use item::{Category, Item, ItemStatus, ItemType};
