// Rust guideline compliant 2026-10-14

//! Finite State Machine module for lead status transitions.
//!
//! The transition table is the only place that decides which status
//! changes are legal:
//!
//! - Pending → Calling, Dropped
//! - Calling → Answered, Dropped, Pending (retry)
//! - Answered → Qualified, Dropped
//! - Qualified and Dropped are terminal
//!
//! Every mutation path validates against this table before persisting.

use crate::error::TransitionError;
use crate::{Lead, LeadStatus, Result};

impl LeadStatus {
    /// Returns the statuses directly reachable from this one.
    ///
    /// Empty for terminal states. Never contains `self`.
    pub fn valid_transitions(self) -> &'static [LeadStatus] {
        match self {
            LeadStatus::Pending => &[LeadStatus::Calling, LeadStatus::Dropped],
            LeadStatus::Calling => &[
                LeadStatus::Answered,
                LeadStatus::Dropped,
                LeadStatus::Pending,
            ],
            LeadStatus::Answered => &[LeadStatus::Qualified, LeadStatus::Dropped],
            LeadStatus::Qualified => &[],
            LeadStatus::Dropped => &[],
        }
    }

    /// Checks whether `target` is directly reachable from this status.
    ///
    /// Self-loops and moves out of terminal states are never reachable.
    pub fn can_transition_to(self, target: LeadStatus) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Returns true if no transition leaves this status.
    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// Checks a transition and describes the rejection.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] naming both endpoints and the legal
    /// alternatives if `target` is not reachable.
    pub fn check_transition(self, target: LeadStatus) -> std::result::Result<(), TransitionError> {
        if self.can_transition_to(target) {
            return Ok(());
        }

        Err(TransitionError {
            from: self,
            to: target,
            allowed: self.valid_transitions().to_vec(),
        })
    }
}

/// Validates a status change for a lead against its current status.
///
/// # Arguments
///
/// * `lead` - The lead to transition
/// * `new_status` - The target status
///
/// # Errors
///
/// Returns [`crate::Error::InvalidTransition`] if the move is not in the table.
pub fn validate_transition(lead: &Lead, new_status: LeadStatus) -> Result<()> {
    Ok(lead.status.check_transition(new_status)?)
}
