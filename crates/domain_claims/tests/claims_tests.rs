//! Tests for the claims domain

use proptest::prelude::*;

use domain_claims::{ClaimError, ClaimNotification, ClaimStatus, ResolutionDecision};
use domain_claims::resolution::ResolutionRequest;
use test_utils::TestClaimBuilder;

// ============================================================================
// Resolution state machine
// ============================================================================

mod resolution_tests {
    use super::*;

    #[test]
    fn test_pending_is_not_terminal() {
        assert!(!ClaimStatus::Pending.is_terminal());
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_approval_moves_claim_out_of_pending() {
        let mut claim = TestClaimBuilder::new().build();
        let changed = claim.resolve(ResolutionDecision::Approved).unwrap();
        assert!(changed);
        assert_eq!(claim.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_rejection_moves_claim_out_of_pending() {
        let mut claim = TestClaimBuilder::new().build();
        let changed = claim.resolve(ResolutionDecision::Rejected).unwrap();
        assert!(changed);
        assert_eq!(claim.status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_replay_reports_no_change() {
        let mut claim = TestClaimBuilder::new()
            .with_status(ClaimStatus::Approved)
            .build();
        let changed = claim.resolve(ResolutionDecision::Approved).unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_no_transition_back_to_pending_exists() {
        // The only mutation path is resolve(), and its targets are terminal.
        let mut claim = TestClaimBuilder::new()
            .with_status(ClaimStatus::Rejected)
            .build();
        for decision in [ResolutionDecision::Approved, ResolutionDecision::Rejected] {
            let _ = claim.resolve(decision);
            assert_ne!(claim.status, ClaimStatus::Pending);
        }
    }

    #[test]
    fn test_conflicting_replay_is_an_error() {
        let mut claim = TestClaimBuilder::new()
            .with_status(ClaimStatus::Rejected)
            .build();
        let err = claim.resolve(ResolutionDecision::Approved).unwrap_err();
        assert!(matches!(err, ClaimError::AlreadyResolved { .. }));
        assert_eq!(claim.status, ClaimStatus::Rejected);
    }

    proptest! {
        /// Once terminal, a claim's status never changes again, whatever
        /// sequence of decisions an admin replays against it.
        #[test]
        fn prop_terminal_status_is_sticky(decisions in proptest::collection::vec(0u8..2, 1..8)) {
            let mut claim = TestClaimBuilder::new().build();
            claim.resolve(ResolutionDecision::Approved).unwrap();
            let settled = claim.status;

            for raw in decisions {
                let decision = if raw == 0 {
                    ResolutionDecision::Approved
                } else {
                    ResolutionDecision::Rejected
                };
                let _ = claim.resolve(decision);
                prop_assert_eq!(claim.status, settled);
            }
        }
    }
}

// ============================================================================
// Request validation
// ============================================================================

mod request_tests {
    use super::*;

    #[test]
    fn test_valid_requests_parse() {
        let req = ResolutionRequest::parse(42, "approved").unwrap();
        assert_eq!(req.claim_id.as_i64(), 42);
        assert_eq!(req.decision, ResolutionDecision::Approved);
    }

    #[test]
    fn test_non_positive_claim_id_rejected() {
        assert!(matches!(
            ResolutionRequest::parse(0, "approved"),
            Err(ClaimError::InvalidParameters(_))
        ));
        assert!(matches!(
            ResolutionRequest::parse(-1, "rejected"),
            Err(ClaimError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_unknown_decisions_rejected() {
        // The superseded vocabulary from the legacy endpoint must not parse.
        for bad in ["approved_email_sent", "pending", "closed", ""] {
            assert!(matches!(
                ResolutionRequest::parse(1, bad),
                Err(ClaimError::InvalidDecision(_))
            ));
        }
    }
}

// ============================================================================
// Intake rules
// ============================================================================

mod intake_tests {
    use super::*;
    use domain_claims::Claim;

    #[test]
    fn test_justification_is_trimmed() {
        assert_eq!(
            Claim::normalize_justification(" my backpack \n").unwrap(),
            "my backpack"
        );
    }

    #[test]
    fn test_blank_justification_rejected() {
        for blank in ["", " ", "\t\n"] {
            assert!(matches!(
                Claim::normalize_justification(blank),
                Err(ClaimError::EmptyJustification)
            ));
        }
    }
}

// ============================================================================
// Notification composition
// ============================================================================

mod notification_tests {
    use super::*;

    #[test]
    fn test_approval_notice_fields() {
        let notice = ClaimNotification::approval("Ada Lovelace", "ada@campus.edu", "Black umbrella");
        assert_eq!(notice.recipient, "ada@campus.edu");
        assert!(notice.subject.contains("Black umbrella"));
        assert!(notice.subject.contains("approved"));
        assert!(notice.body.contains("Ada Lovelace"));
    }
}
