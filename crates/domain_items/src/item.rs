//! Item aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ItemId, UserId};

use crate::error::ItemError;

/// Whether the report concerns a lost or a found object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

/// Item lifecycle status
///
/// `Claimed` is only ever set by the claim resolution engine as a
/// consequence of exactly one approved claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
pub enum ItemStatus {
    Open,
    Claimed,
    Resolved,
}

impl ItemStatus {
    /// Forward-only transition table
    pub fn can_transition_to(self, target: ItemStatus) -> bool {
        use ItemStatus::*;
        matches!(
            (self, target),
            (Open, Claimed) | (Open, Resolved) | (Claimed, Resolved)
        )
    }
}

/// Report category, seeded from the campus catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "item_category", rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Documents,
    Accessories,
    Clothing,
    Bags,
    Keys,
    Other,
}

/// A lost or found object report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Reporting user
    pub reporter_id: UserId,
    /// Short title shown in listings and notification subjects
    pub title: String,
    /// Free-text description
    pub description: Option<String>,
    /// Category
    pub category: Category,
    /// Lost or found
    pub item_type: ItemType,
    /// Lifecycle status
    pub status: ItemStatus,
    /// Where the object was lost or found
    pub location: Option<String>,
    /// When the loss/find happened
    pub occurred_at: DateTime<Utc>,
    /// When the report was filed
    pub reported_at: DateTime<Utc>,
    /// When the report was closed out
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Updates the status, enforcing the forward-only transition table
    pub fn update_status(&mut self, status: ItemStatus) -> Result<(), ItemError> {
        if !self.status.can_transition_to(status) {
            return Err(ItemError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", status),
            });
        }
        self.status = status;
        if status == ItemStatus::Resolved {
            self.resolved_at = Some(Utc::now());
        }
        Ok(())
    }
}
