//! Error types module
//!
//! All errors surfaced by the feed, upload, watch and comment components are
//! unified under `AppError`. Validation failures are caught before any store
//! call and carry the exact message shown to the user; store failures carry the
//! collaborator's reason verbatim.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a failed store call
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "STORE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the interaction can be retried as-is
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Locally detected input problems. Never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a valid video file")]
    InvalidSelectedFile,

    #[error("Please drop a valid video file")]
    InvalidDroppedFile,

    #[error("Please provide a video file and title")]
    MissingFileOrTitle,

    #[error("Please provide your name and a comment")]
    EmptyComment,

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Failure reported by the store; the message is shown verbatim.
    #[error("{0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("An upload is already in progress")]
    SubmissionInFlight,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(ValidationError::Invalid(format!(
            "UUID parsing error: {}",
            err
        )))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(ValidationError::Invalid(format!(
            "Validation error: {}",
            err
        )))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::Validation(_) => (
            "VALIDATION_ERROR",
            true,
            Some("Correct the highlighted fields and try again"),
            LogLevel::Debug,
        ),
        AppError::Store(_) => (
            "STORE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Go back to the feed"),
            LogLevel::Debug,
        ),
        AppError::SubmissionInFlight => (
            "SUBMISSION_IN_FLIGHT",
            true,
            Some("Wait for the current upload to finish"),
            LogLevel::Debug,
        ),
        AppError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check the store environment variables"),
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Store(msg) if msg.trim().is_empty() => {
                crate::constants::GENERIC_UPLOAD_ERROR.to_string()
            }
            AppError::Store(msg) => msg.clone(),
            AppError::NotFound(_) => "Video not found".to_string(),
            AppError::SubmissionInFlight => self.to_string(),
            AppError::Config(_) | AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An unexpected error occurred".to_string()
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::from(ValidationError::MissingFileOrTitle);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Please provide a video file and title");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_store_message_is_verbatim() {
        let err = AppError::Store("disk full".to_string());
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.client_message(), "disk full");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_blank_store_message_falls_back() {
        let err = AppError::Store("  ".to_string());
        assert_eq!(err.client_message(), "Upload failed. Please try again.");
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("video 42".to_string());
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Video not found");
        assert_eq!(err.suggested_action(), Some("Go back to the feed"));
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::from(anyhow::anyhow!("socket closed"));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.client_message(), "An unexpected error occurred");
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
