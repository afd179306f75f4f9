//! Test data builders
//!
//! Builders construct domain aggregates with sensible defaults so tests
//! only spell out the fields they actually care about.

use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, ItemId, UserId};
use domain_claims::{Claim, ClaimStatus};
use domain_items::{Category, Item, ItemStatus, ItemType};

use crate::fixtures::StringFixtures;

/// Builder for test claims
pub struct TestClaimBuilder {
    id: ClaimId,
    item_id: ItemId,
    claimant_id: UserId,
    justification: String,
    status: ClaimStatus,
    created_at: DateTime<Utc>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(1).unwrap(),
            item_id: ItemId::new(42).unwrap(),
            claimant_id: UserId::new(7).unwrap(),
            justification: StringFixtures::justification().to_string(),
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn with_item_id(mut self, item_id: ItemId) -> Self {
        self.item_id = item_id;
        self
    }

    pub fn with_claimant_id(mut self, claimant_id: UserId) -> Self {
        self.claimant_id = claimant_id;
        self
    }

    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = justification.into();
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Claim {
        Claim {
            id: self.id,
            item_id: self.item_id,
            claimant_id: self.claimant_id,
            justification: self.justification,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Builder for test items
pub struct TestItemBuilder {
    id: ItemId,
    reporter_id: UserId,
    title: String,
    category: Category,
    item_type: ItemType,
    status: ItemStatus,
    location: Option<String>,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    pub fn new() -> Self {
        Self {
            id: ItemId::new(42).unwrap(),
            reporter_id: UserId::new(2).unwrap(),
            title: StringFixtures::item_title().to_string(),
            category: Category::Bags,
            item_type: ItemType::Found,
            status: ItemStatus::Open,
            location: Some("Main library".to_string()),
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn build(self) -> Item {
        let now = Utc::now();
        Item {
            id: self.id,
            reporter_id: self.reporter_id,
            title: self.title,
            description: None,
            category: self.category,
            item_type: self.item_type,
            status: self.status,
            location: self.location,
            occurred_at: now,
            reported_at: now,
            resolved_at: None,
        }
    }
}
