//! Claims repository integration tests
//!
//! Run against a containerized PostgreSQL so the unique constraint, the
//! resolution transaction, and the outbox insert are exercised for real.
//! Each test gets its own database.

use core_kernel::ItemId;
use domain_claims::{ClaimError, ClaimStatus, ResolutionRequest};
use domain_items::ItemStatus;
use infra_db::{
    ClaimsRepository, DatabaseError, ItemsRepository, OutboxRepository, OutboxStatus,
    ResolutionError,
};
use test_utils::{ActorFixtures, StringFixtures, TestDatabase};

/// Seeds the standard cast: a claimant, an admin, and a second user
async fn setup() -> TestDatabase {
    let db = TestDatabase::new().await.expect("container start");

    let claimant = ActorFixtures::user();
    let admin = ActorFixtures::admin();
    let other = ActorFixtures::other_user();

    db.seed_user(
        claimant.user_id,
        StringFixtures::full_name(),
        StringFixtures::email(),
        claimant.role,
    )
    .await
    .unwrap();
    db.seed_user(admin.user_id, "Sam Admin", "admin@campus.edu", admin.role)
        .await
        .unwrap();
    db.seed_user(other.user_id, "Riley Chen", "riley@campus.edu", other.role)
        .await
        .unwrap();

    db
}

fn approve(claim_id: core_kernel::ClaimId) -> ResolutionRequest {
    ResolutionRequest::parse(claim_id.as_i64(), "approved").unwrap()
}

fn reject(claim_id: core_kernel::ClaimId) -> ResolutionRequest {
    ResolutionRequest::parse(claim_id.as_i64(), "rejected").unwrap()
}

#[tokio::test]
async fn test_duplicate_claim_per_claimant_and_item_is_rejected() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();

    claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();

    // Same pair again, regardless of the first claim's status.
    let err = claims
        .create(claimant.user_id, item_id, "trying again")
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::DuplicateEntry(_)));

    // A different claimant on the same item is fine.
    claims
        .create(ActorFixtures::other_user().user_id, item_id, "mine actually")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_approval_updates_claim_item_and_outbox_together() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let items = ItemsRepository::new(db.pool().clone());
    let outbox = OutboxRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();
    let claim = claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();

    let resolution = claims.resolve(approve(claim.id)).await.unwrap();
    assert_eq!(resolution.status, ClaimStatus::Approved);
    assert!(!resolution.replayed);
    assert!(resolution.notification_queued);

    // All three effects are visible after commit.
    let item = items.get_by_id(item_id).await.unwrap();
    assert_eq!(item.status, ItemStatus::Claimed);

    let mine = claims.list_for_claimant(claimant.user_id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ClaimStatus::Approved);

    let queued = outbox.fetch_due(10, 5).await.unwrap();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].recipient, StringFixtures::email());
    assert!(queued[0].subject.contains(StringFixtures::item_title()));
    assert_eq!(queued[0].claim_id, claim.id);
}

#[tokio::test]
async fn test_rejection_leaves_item_untouched_and_queues_nothing() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let items = ItemsRepository::new(db.pool().clone());
    let outbox = OutboxRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();
    let claim = claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();

    let resolution = claims.resolve(reject(claim.id)).await.unwrap();
    assert_eq!(resolution.status, ClaimStatus::Rejected);
    assert!(!resolution.notification_queued);

    let item = items.get_by_id(item_id).await.unwrap();
    assert_eq!(item.status, ItemStatus::Open);
    assert!(outbox.fetch_due(10, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolution_succeeds_with_no_dispatcher_running() {
    // Delivery is decoupled: approval commits and reports success while
    // the notification sits in the outbox, undelivered.
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let outbox = OutboxRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();
    let claim = claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();

    let resolution = claims.resolve(approve(claim.id)).await.unwrap();
    assert!(resolution.notification_queued);

    let queued = outbox.fetch_due(10, 5).await.unwrap();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].status, OutboxStatus::Pending);
    assert_eq!(queued[0].attempts, 0);
    assert!(queued[0].sent_at.is_none());
}

#[tokio::test]
async fn test_replaying_the_same_decision_is_idempotent() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let outbox = OutboxRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();
    let claim = claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();

    claims.resolve(approve(claim.id)).await.unwrap();
    let replay = claims.resolve(approve(claim.id)).await.unwrap();

    assert!(replay.replayed);
    assert!(!replay.notification_queued);
    // Still exactly one queued notification.
    assert_eq!(outbox.fetch_due(10, 5).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_conflicting_decision_on_a_terminal_claim_fails() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();
    let claim = claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();

    claims.resolve(reject(claim.id)).await.unwrap();
    let err = claims.resolve(approve(claim.id)).await.unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Claim(ClaimError::AlreadyResolved { .. })
    ));
}

#[tokio::test]
async fn test_second_approval_on_the_same_item_is_unavailable() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();
    let other = ActorFixtures::other_user();

    let item_id = db
        .seed_item(claimant.user_id, StringFixtures::item_title())
        .await
        .unwrap();
    let first = claims
        .create(claimant.user_id, item_id, StringFixtures::justification())
        .await
        .unwrap();
    let second = claims
        .create(other.user_id, item_id, "it is mine")
        .await
        .unwrap();

    claims.resolve(approve(first.id)).await.unwrap();
    let err = claims.resolve(approve(second.id)).await.unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Claim(ClaimError::ItemUnavailable)
    ));
}

#[tokio::test]
async fn test_claim_on_a_missing_item_is_a_foreign_key_violation() {
    let db = setup().await;
    let claims = ClaimsRepository::new(db.pool().clone());
    let claimant = ActorFixtures::user();

    let err = claims
        .create(
            claimant.user_id,
            ItemId::new(999_999).unwrap(),
            StringFixtures::justification(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::ForeignKeyViolation(_)));
}
