//! Error types module
//!
//! This module provides the core error taxonomy used throughout the meetnote
//! application. All failures are unified under the `AppError` enum so callers
//! and tests can assert on failure category rather than message text.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like provider hiccups
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "ASSET_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    /// The provider reported the uploaded asset as failed before it became
    /// ready; the action was aborted before any prompt dispatch.
    #[error("Remote asset failed: {0}")]
    AssetFailed(String),

    /// The model invocation itself failed (network, quota, malformed request).
    #[error("Model error: {0}")]
    ModelError(String),

    /// Asset polling exhausted its retry budget without a terminal state.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Model calls are disabled because no provider credential is configured.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

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
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the recording size and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::AssetFailed(_) => (
            502,
            "ASSET_FAILED",
            true,
            Some("Re-upload the recording and trigger the action again"),
            false,
            LogLevel::Warn,
        ),
        AppError::ModelError(_) => (
            502,
            "MODEL_ERROR",
            true,
            Some("Retry the action; contact support if this persists"),
            false,
            LogLevel::Error,
        ),
        AppError::Timeout(_) => (
            504,
            "POLL_TIMEOUT",
            true,
            Some("Retry the action; long recordings may need several attempts"),
            false,
            LogLevel::Warn,
        ),
        AppError::ModelUnavailable(_) => (
            503,
            "MODEL_UNAVAILABLE",
            false,
            Some("Configure GOOGLE_API_KEY and restart the service"),
            false,
            LogLevel::Warn,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Storage(_) => "Storage operation failed".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An internal error occurred".to_string()
            }
            // Provider failures are surfaced verbatim; the user must decide
            // whether to retry the same control.
            other => other.to_string(),
        }
    }
}

impl AppError {
    /// Short variant name, used as a structured logging field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::AssetFailed(_) => "AssetFailed",
            AppError::ModelError(_) => "ModelError",
            AppError::Timeout(_) => "Timeout",
            AppError::ModelUnavailable(_) => "ModelUnavailable",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Detailed internal message, including the source chain where present.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_failed_category() {
        let err = AppError::AssetFailed("provider marked file FAILED".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "ASSET_FAILED");
        assert!(err.is_recoverable());
        assert!(!err.is_sensitive());
    }

    #[test]
    fn test_timeout_category() {
        let err = AppError::Timeout("asset not ready after 120 checks".to_string());
        assert_eq!(err.http_status_code(), 504);
        assert_eq!(err.error_code(), "POLL_TIMEOUT");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_model_error_message_surfaced_verbatim() {
        let err = AppError::ModelError("quota exceeded".to_string());
        assert!(err.client_message().contains("quota exceeded"));
        assert_eq!(err.error_code(), "MODEL_ERROR");
    }

    #[test]
    fn test_internal_hides_details_from_client() {
        let err = AppError::Internal("disk exploded at /var/tmp".to_string());
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("/var/tmp"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(io_err);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.detailed_message().contains("denied"));
    }

    #[test]
    fn test_from_anyhow_preserves_source() {
        let err: AppError = anyhow::anyhow!("root cause").into();
        match err {
            AppError::InternalWithSource { ref message, .. } => {
                assert_eq!(message, "root cause");
            }
            _ => panic!("Expected InternalWithSource variant"),
        }
        assert_eq!(err.error_type(), "Internal");
    }
}
