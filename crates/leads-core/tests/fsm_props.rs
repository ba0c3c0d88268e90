// Rust guideline compliant 2026-10-14

//! Property-based tests for the FSM module.
//!
//! These tests check properties that hold for every status and every
//! ordered pair of statuses.

use leads_core::LeadStatus;
use proptest::prelude::*;

/// Generates arbitrary LeadStatus values.
fn arb_status() -> impl Strategy<Value = LeadStatus> {
    prop_oneof![
        Just(LeadStatus::Pending),
        Just(LeadStatus::Calling),
        Just(LeadStatus::Answered),
        Just(LeadStatus::Qualified),
        Just(LeadStatus::Dropped),
    ]
}

proptest! {
    /// The allowed-set is a subset of the domain and excludes the status itself.
    #[test]
    fn prop_valid_transitions_are_proper_subset(status in arb_status()) {
        let allowed = status.valid_transitions();
        prop_assert!(!allowed.contains(&status));
        for target in allowed {
            prop_assert!(LeadStatus::ALL.contains(target));
        }
    }

    /// A status is terminal exactly when it has no outgoing transitions.
    #[test]
    fn prop_terminal_iff_no_transitions(status in arb_status()) {
        prop_assert_eq!(status.is_terminal(), status.valid_transitions().is_empty());
    }

    /// can_transition_to agrees with membership in the allowed-set.
    #[test]
    fn prop_can_transition_matches_membership(from in arb_status(), to in arb_status()) {
        prop_assert_eq!(
            from.can_transition_to(to),
            from.valid_transitions().contains(&to)
        );
    }

    /// check_transition accepts exactly what can_transition_to accepts.
    #[test]
    fn prop_check_transition_consistency(from in arb_status(), to in arb_status()) {
        let checked = from.check_transition(to);
        prop_assert_eq!(checked.is_ok(), from.can_transition_to(to));
        if let Err(err) = checked {
            prop_assert_eq!(err.from, from);
            prop_assert_eq!(err.to, to);
            prop_assert_eq!(err.allowed.as_slice(), from.valid_transitions());
        }
    }

    /// Repeated queries return identical answers.
    #[test]
    fn prop_validator_is_idempotent(from in arb_status(), to in arb_status()) {
        prop_assert_eq!(from.can_transition_to(to), from.can_transition_to(to));
        prop_assert_eq!(from.valid_transitions(), from.valid_transitions());
        prop_assert_eq!(from.check_transition(to), from.check_transition(to));
    }

    /// Nothing leaves a terminal state.
    #[test]
    fn prop_terminal_states_reject_everything(from in arb_status(), to in arb_status()) {
        if from.is_terminal() {
            prop_assert!(!from.can_transition_to(to));
        }
    }
}
