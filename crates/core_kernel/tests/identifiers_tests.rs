//! Identifier tests

use core_kernel::{ClaimId, ItemId, UserId};

#[test]
fn test_positive_ids_accepted() {
    assert_eq!(ClaimId::new(1).unwrap().as_i64(), 1);
    assert_eq!(ItemId::new(i64::MAX).unwrap().as_i64(), i64::MAX);
}

#[test]
fn test_non_positive_ids_rejected() {
    assert!(ClaimId::new(0).is_err());
    assert!(ItemId::new(-1).is_err());
    assert!(UserId::new(i64::MIN).is_err());
}

#[test]
fn test_parse_from_string() {
    let id: ClaimId = "42".parse().unwrap();
    assert_eq!(id.as_i64(), 42);

    assert!("0".parse::<ClaimId>().is_err());
    assert!("not-a-number".parse::<ClaimId>().is_err());
}

#[test]
fn test_serde_transparent() {
    let id = UserId::new(7).unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), "7");

    let back: UserId = serde_json::from_str("7").unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_entity_names() {
    assert_eq!(ClaimId::entity(), "claim");
    assert_eq!(ItemId::entity(), "item");
    assert_eq!(UserId::entity(), "user");
}
