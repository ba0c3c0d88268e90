// Rust guideline compliant 2026-10-14

//! Leads Core Library
//!
//! This crate provides the foundational components for the lead dialer:
//! - Data models (Lead, LeadStatus, CallAttempt)
//! - FSM logic (lead status transition table and validation)
//! - Storage engine (JSONL read/write, file locking, conditional status writes)
//! - Hash ID generation and resolution
//! - Configuration and error types

pub mod config;
pub mod error;
pub mod fsm;
pub mod identity;
pub mod models;
pub mod stats;
pub mod storage;

pub use config::{Config, OutputFormat};
pub use error::{Error, Result, TransitionError};
pub use fsm::validate_transition;
pub use models::{
    normalize_phone, CallAttempt, CallAttemptStatus, Lead, LeadResult, LeadRole, LeadSource,
    LeadStatus,
};
pub use stats::LeadStats;
pub use storage::{Record, Storage};
