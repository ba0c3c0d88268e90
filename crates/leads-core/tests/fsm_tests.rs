// Rust guideline compliant 2026-10-14

//! Unit tests for the FSM module.
//!
//! These tests pin the concrete transition table, terminal states, and
//! the rejection message for illegal moves.

use leads_core::{validate_transition, Error, Lead, LeadSource, LeadStatus};

#[test]
fn test_pending_to_calling() {
    assert!(
        LeadStatus::Pending.can_transition_to(LeadStatus::Calling),
        "Should allow Pending → Calling"
    );
}

#[test]
fn test_pending_to_answered_rejected() {
    assert!(
        !LeadStatus::Pending.can_transition_to(LeadStatus::Answered),
        "A lead must pass through Calling before Answered"
    );
}

#[test]
fn test_calling_to_pending_retry() {
    assert!(
        LeadStatus::Calling.can_transition_to(LeadStatus::Pending),
        "Should allow Calling → Pending for retry"
    );
}

#[test]
fn test_answered_to_qualified() {
    assert!(LeadStatus::Answered.can_transition_to(LeadStatus::Qualified));
}

#[test]
fn test_qualified_to_dropped_rejected() {
    assert!(
        !LeadStatus::Qualified.can_transition_to(LeadStatus::Dropped),
        "Qualified is terminal"
    );
}

#[test]
fn test_dropped_to_pending_rejected() {
    assert!(
        !LeadStatus::Dropped.can_transition_to(LeadStatus::Pending),
        "Dropped is terminal"
    );
}

#[test]
fn test_full_table() {
    let expected: [(LeadStatus, &[LeadStatus]); 5] = [
        (LeadStatus::Pending, &[LeadStatus::Calling, LeadStatus::Dropped]),
        (
            LeadStatus::Calling,
            &[LeadStatus::Answered, LeadStatus::Dropped, LeadStatus::Pending],
        ),
        (LeadStatus::Answered, &[LeadStatus::Qualified, LeadStatus::Dropped]),
        (LeadStatus::Qualified, &[]),
        (LeadStatus::Dropped, &[]),
    ];

    for (from, allowed) in expected {
        assert_eq!(from.valid_transitions(), allowed, "table row for {}", from);
    }
}

#[test]
fn test_all_25_pairs_match_table() {
    for from in LeadStatus::ALL {
        for to in LeadStatus::ALL {
            assert_eq!(
                from.can_transition_to(to),
                from.valid_transitions().contains(&to),
                "can_transition_to disagrees with table for {} → {}",
                from,
                to
            );
        }
    }
}

#[test]
fn test_no_self_loops() {
    for status in LeadStatus::ALL {
        assert!(
            !status.can_transition_to(status),
            "{} → {} should be rejected",
            status,
            status
        );
    }
}

#[test]
fn test_terminal_states() {
    let terminal: Vec<LeadStatus> = LeadStatus::ALL
        .into_iter()
        .filter(|status| status.is_terminal())
        .collect();
    assert_eq!(terminal, vec![LeadStatus::Qualified, LeadStatus::Dropped]);
}

#[test]
fn test_check_transition_rejection_carries_alternatives() {
    let err = LeadStatus::Pending
        .check_transition(LeadStatus::Qualified)
        .expect_err("Pending → Qualified must be rejected");
    assert_eq!(err.from, LeadStatus::Pending);
    assert_eq!(err.to, LeadStatus::Qualified);
    assert_eq!(err.allowed, vec![LeadStatus::Calling, LeadStatus::Dropped]);
    assert!(err.to_string().contains("Allowed transitions: [calling, dropped]"));
}

#[test]
fn test_validate_transition_uses_lead_status() {
    let mut lead = Lead::new("+923001234567".to_string(), LeadSource::New);
    assert!(validate_transition(&lead, LeadStatus::Calling).is_ok());

    lead.status = LeadStatus::Answered;
    match validate_transition(&lead, LeadStatus::Pending) {
        Err(Error::InvalidTransition(err)) => {
            assert_eq!(err.from, LeadStatus::Answered);
            assert_eq!(err.to, LeadStatus::Pending);
        }
        other => panic!("expected invalid transition, got {:?}", other),
    }
}

#[test]
fn test_third_no_answer_drop_is_approved() {
    // A lead in Calling with exhausted attempts is sent to Dropped by the
    // retry rule; the table must allow it.
    let mut lead = Lead::new("+923001234567".to_string(), LeadSource::New);
    lead.status = LeadStatus::Calling;
    lead.call_attempts = 3;
    assert!(validate_transition(&lead, LeadStatus::Dropped).is_ok());
}
