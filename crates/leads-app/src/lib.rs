// Rust guideline compliant 2026-10-14

//! Shared application services for the lead dialer.
//!
//! This crate provides reusable, non-CLI-specific services: repository
//! discovery, ID resolution, listing, status changes, the call lifecycle,
//! sample data, and standardized response envelopes.

pub mod calls;
pub mod error;
pub mod fsm;
pub mod ids;
pub mod list;
pub mod repo;
pub mod response;
pub mod seed;

pub use calls::{
    CallDesk, CallOutcome, CallStart, CallbackAck, DialInstructions, RetryPolicy, StatusCallback,
};
pub use error::{AppError, ErrorCode, Result};
pub use fsm::{change_status, update_lead, validate_transition, LeadUpdate};
pub use ids::resolve_lead_id;
pub use list::{
    list_leads, parse_result, parse_role, parse_source, parse_status, LeadPage, ListOptions,
};
pub use repo::{InitReport, RepoContext};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use seed::{clear, seed, ClearSummary};
