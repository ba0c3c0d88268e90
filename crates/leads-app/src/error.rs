// Rust guideline compliant 2026-10-14

//! Error handling for lead dialer application services.

use leads_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command and callback responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested lead or record was not found.
    NotFound,
    /// The provided identifier matched multiple leads.
    AmbiguousId,
    /// The requested status change is not in the transition table.
    InvalidTransition,
    /// The persisted status changed between read and write.
    StatusConflict,
    /// Another lead already uses the phone number.
    DuplicatePhone,
    /// Lead or call attempt data failed validation.
    ValidationError,
    /// The configuration file or environment is invalid.
    InvalidConfig,
    /// IO failure while reading or writing repository data.
    IoError,
    /// The repository has not been initialized.
    RepoNotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
    /// JSON serialization or parsing failed.
    JsonError,
    /// A fallback for unexpected errors.
    Internal,
}

impl ErrorCode {
    /// Returns true when the caller can fix the error by changing the request.
    ///
    /// The CLI maps client errors to exit code 2 and everything else to 1.
    #[must_use]
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorCode::NotFound
                | ErrorCode::AmbiguousId
                | ErrorCode::InvalidTransition
                | ErrorCode::StatusConflict
                | ErrorCode::DuplicatePhone
                | ErrorCode::ValidationError
                | ErrorCode::InvalidInput
        )
    }
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository is missing or not initialized.
    #[error("Lead repository not initialized at {path}. Run 'ldm init' first.")]
    RepoNotInitialized {
        /// Path where `.leads` was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RepoNotInitialized { .. } => ErrorCode::RepoNotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::AmbiguousId(_, _) => ErrorCode::AmbiguousId,
                CoreError::InvalidTransition(_) => ErrorCode::InvalidTransition,
                CoreError::StatusConflict { .. } => ErrorCode::StatusConflict,
                CoreError::DuplicatePhone(_) => ErrorCode::DuplicatePhone,
                CoreError::InvalidLead(_) => ErrorCode::ValidationError,
                CoreError::InvalidConfig(_) => ErrorCode::InvalidConfig,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns true when the error was caused by the request, not the system.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::RepoNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::InvalidInput(_) | AppError::Io(_) => None,
            AppError::Core(core) => match core {
                CoreError::AmbiguousId(partial, matches) => Some(serde_json::json!({
                    "partial": partial,
                    "matches": matches,
                })),
                CoreError::InvalidTransition(err) => Some(serde_json::json!({
                    "from": err.from,
                    "to": err.to,
                    "allowed": err.allowed,
                })),
                CoreError::StatusConflict {
                    id,
                    expected,
                    actual,
                } => Some(serde_json::json!({
                    "id": id,
                    "expected": expected,
                    "actual": actual,
                })),
                CoreError::DuplicatePhone(phone) => Some(serde_json::json!({
                    "phone": phone,
                })),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leads_core::{LeadStatus, TransitionError};

    #[test]
    fn test_transition_error_details() {
        let error = AppError::from(CoreError::from(TransitionError {
            from: LeadStatus::Pending,
            to: LeadStatus::Qualified,
            allowed: vec![LeadStatus::Calling, LeadStatus::Dropped],
        }));
        assert_eq!(error.code(), ErrorCode::InvalidTransition);
        assert!(error.is_client_error());

        let details = error.details().expect("details");
        assert_eq!(details["from"], "pending");
        assert_eq!(details["to"], "qualified");
        assert_eq!(details["allowed"], serde_json::json!(["calling", "dropped"]));
    }

    #[test]
    fn test_conflict_details() {
        let error = AppError::from(CoreError::StatusConflict {
            id: "lead-abc123".to_string(),
            expected: LeadStatus::Calling,
            actual: LeadStatus::Answered,
        });
        assert_eq!(error.code(), ErrorCode::StatusConflict);
        let details = error.details().expect("details");
        assert_eq!(details["expected"], "calling");
        assert_eq!(details["actual"], "answered");
    }

    #[test]
    fn test_system_errors_are_not_client_errors() {
        let io = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_client_error());
        let repo = AppError::RepoNotInitialized {
            path: PathBuf::from("/tmp/.leads"),
        };
        assert!(!repo.is_client_error());
        assert_eq!(
            serde_json::to_value(repo.code()).expect("serialize"),
            "repo_not_initialized"
        );
    }
}
