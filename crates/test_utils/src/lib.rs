//! Test Utilities Crate
//!
//! Shared fixtures and builders for the lost-and-found test suites.
//!
//! # Modules
//!
//! - `fixtures`: pre-built actors and common string values
//! - `builders`: builder patterns for claims and items with sensible defaults
//! - `database`: a containerized PostgreSQL harness for integration suites

pub mod builders;
pub mod database;
pub mod fixtures;

pub use builders::*;
pub use database::TestDatabase;
pub use fixtures::*;
