//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around the database's `BIGSERIAL` surrogate keys.
//! Constructors reject non-positive values, so a well-typed identifier is
//! always a plausible row key and accidental mixing of identifier kinds
//! does not compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw key, rejecting non-positive values
            pub fn new(raw: i64) -> Result<Self, CoreError> {
                if raw <= 0 {
                    return Err(CoreError::validation(concat!(
                        "a valid ", $entity, " id is required"
                    )));
                }
                Ok(Self(raw))
            }

            /// Returns the underlying key
            pub fn as_i64(&self) -> i64 {
                self.0
            }

            /// Entity name used in error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: i64 = s.parse().map_err(|_| {
                    CoreError::validation(concat!("a valid ", $entity, " id is required"))
                })?;
                Self::new(raw)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = CoreError;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(UserId, "user");
define_id!(ItemId, "item");
define_id!(ClaimId, "claim");
define_id!(NotificationId, "notification");
