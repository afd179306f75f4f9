//! Pre-built test data for common entities

use core_kernel::{Actor, Role, UserId};

/// Actor fixtures
pub struct ActorFixtures;

impl ActorFixtures {
    /// A regular authenticated user (id 7)
    pub fn user() -> Actor {
        Actor::new(UserId::new(7).unwrap(), Role::User)
    }

    /// An administrator (id 1)
    pub fn admin() -> Actor {
        Actor::new(UserId::new(1).unwrap(), Role::Admin)
    }

    /// A second regular user, for uniqueness scenarios
    pub fn other_user() -> Actor {
        Actor::new(UserId::new(8).unwrap(), Role::User)
    }
}

/// Common string values
pub struct StringFixtures;

impl StringFixtures {
    pub fn email() -> &'static str {
        "student@campus.edu"
    }

    pub fn full_name() -> &'static str {
        "Jordan Santos"
    }

    pub fn item_title() -> &'static str {
        "Blue backpack"
    }

    pub fn justification() -> &'static str {
        "It has my initials stitched on the front pocket"
    }
}
