// Rust guideline compliant 2026-10-14

//! Error types for the leads core library.

use crate::models::LeadStatus;
use thiserror::Error;

/// Result type alias for lead operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejection of a proposed status change.
///
/// Carries both endpoints and every status that would have been accepted
/// from `from`, so callers can report the legal alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Invalid transition from \"{from}\" to \"{to}\". Allowed transitions: [{}]",
    join_statuses(.allowed)
)]
pub struct TransitionError {
    /// Status the lead is currently in.
    pub from: LeadStatus,
    /// Status that was requested.
    pub to: LeadStatus,
    /// Statuses directly reachable from `from`.
    pub allowed: Vec<LeadStatus>,
}

fn join_statuses(statuses: &[LeadStatus]) -> String {
    statuses
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error types for lead operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid lead or call attempt data.
    #[error("Invalid lead: {0}")]
    InvalidLead(String),

    /// Record not found.
    #[error("Lead not found: {0}")]
    NotFound(String),

    /// Proposed status change is not in the transition table.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// Another writer committed the lead between read and write.
    #[error("Status conflict for {id}: read \"{expected}\", now \"{actual}\" after a concurrent write")]
    StatusConflict {
        /// Lead identifier.
        id: String,
        /// Status the caller read before validating.
        expected: LeadStatus,
        /// Status currently persisted.
        actual: LeadStatus,
    },

    /// Another lead already uses this phone number.
    #[error("Lead with phone number {0} already exists")]
    DuplicatePhone(String),

    /// Ambiguous partial ID.
    #[error("Ambiguous ID: {0} matches {1:?}")]
    AmbiguousId(String, Vec<String>),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
