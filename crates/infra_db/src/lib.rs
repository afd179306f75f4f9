//! Infrastructure Database Layer
//!
//! PostgreSQL access for the lost-and-found system, following the
//! repository pattern: each aggregate gets a repository that owns its SQL
//! and hides the database from the domain layer.
//!
//! The claim resolution transaction (claim update, conditional item
//! update, conditional outbox insert) lives in
//! [`repositories::claims::ClaimsRepository::resolve`]; it is the sole
//! writer of `claims.status` and the only path that sets an item to
//! `claimed`.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::claims::{ClaimResolution, ClaimsRepository, ResolutionError};
pub use repositories::items::ItemsRepository;
pub use repositories::outbox::{OutboxRepository, OutboxRow, OutboxStatus};
pub use repositories::stats::StatsRepository;
pub use repositories::users::UsersRepository;
