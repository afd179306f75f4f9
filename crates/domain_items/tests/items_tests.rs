//! Tests for the item domain

use chrono::Utc;
use core_kernel::{ItemId, UserId};
use domain_items::{Category, Item, ItemError, ItemStatus, ItemType};

fn open_item() -> Item {
    Item {
        id: ItemId::new(42).unwrap(),
        reporter_id: UserId::new(7).unwrap(),
        title: "Blue backpack".to_string(),
        description: Some("Left in the library reading room".to_string()),
        category: Category::Bags,
        item_type: ItemType::Found,
        status: ItemStatus::Open,
        location: Some("Main library".to_string()),
        occurred_at: Utc::now(),
        reported_at: Utc::now(),
        resolved_at: None,
    }
}

#[test]
fn test_open_to_claimed() {
    let mut item = open_item();
    assert!(item.update_status(ItemStatus::Claimed).is_ok());
    assert_eq!(item.status, ItemStatus::Claimed);
    assert!(item.resolved_at.is_none());
}

#[test]
fn test_claimed_to_resolved_sets_timestamp() {
    let mut item = open_item();
    item.update_status(ItemStatus::Claimed).unwrap();
    item.update_status(ItemStatus::Resolved).unwrap();
    assert_eq!(item.status, ItemStatus::Resolved);
    assert!(item.resolved_at.is_some());
}

#[test]
fn test_open_directly_to_resolved() {
    let mut item = open_item();
    assert!(item.update_status(ItemStatus::Resolved).is_ok());
}

#[test]
fn test_resolved_is_terminal() {
    let mut item = open_item();
    item.update_status(ItemStatus::Resolved).unwrap();

    for target in [ItemStatus::Open, ItemStatus::Claimed, ItemStatus::Resolved] {
        let err = item.update_status(target).unwrap_err();
        assert!(matches!(err, ItemError::InvalidStatusTransition { .. }));
    }
    assert_eq!(item.status, ItemStatus::Resolved);
}

#[test]
fn test_claimed_cannot_reopen() {
    let mut item = open_item();
    item.update_status(ItemStatus::Claimed).unwrap();
    assert!(item.update_status(ItemStatus::Open).is_err());
}

#[test]
fn test_status_serde_names() {
    assert_eq!(serde_json::to_string(&ItemStatus::Open).unwrap(), "\"open\"");
    assert_eq!(
        serde_json::to_string(&ItemStatus::Claimed).unwrap(),
        "\"claimed\""
    );
    assert_eq!(serde_json::to_string(&ItemType::Lost).unwrap(), "\"lost\"");
    assert_eq!(
        serde_json::to_string(&Category::Electronics).unwrap(),
        "\"electronics\""
    );
}
