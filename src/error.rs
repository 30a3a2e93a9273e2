//! Error types for Snooze
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling. The first four
//! variants form the user-facing taxonomy: every failed action is
//! reported to the user under one of them.

use thiserror::Error;

/// Main error type for Snooze operations
#[derive(Error, Debug)]
pub enum SnoozeError {
    /// Credentials were rejected or the action requires a logged-in user
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Input was rejected, either locally (empty form field) or by the API
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API could not be reached or answered with a server failure
    #[error("Network error: {0}")]
    Network(String),

    /// A story or user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Transport failures: connection refused, timeouts, broken bodies
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for Snooze operations
///
/// Uses `anyhow::Error` so callers can attach context; the typed
/// [`SnoozeError`] is recovered with [`classify`].
pub type Result<T> = anyhow::Result<T>;

/// User-facing error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing credentials
    Authentication,
    /// Rejected input
    Validation,
    /// Unreachable or failing API
    Network,
    /// Missing story or user
    NotFound,
    /// Anything else (storage, config, IO)
    Other,
}

impl ErrorKind {
    /// Short label shown in front of error messages
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Authentication => "login required",
            ErrorKind::Validation => "invalid input",
            ErrorKind::Network => "network problem",
            ErrorKind::NotFound => "not found",
            ErrorKind::Other => "error",
        }
    }
}

impl SnoozeError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnoozeError::Authentication(_) => ErrorKind::Authentication,
            SnoozeError::Validation(_) => ErrorKind::Validation,
            SnoozeError::Network(_) => ErrorKind::Network,
            SnoozeError::NotFound(_) => ErrorKind::NotFound,
            SnoozeError::Http(_) => ErrorKind::Network,
            _ => ErrorKind::Other,
        }
    }
}

/// Classify an `anyhow` error by walking its chain for a [`SnoozeError`]
///
/// # Examples
///
/// ```
/// use snooze::error::{classify, ErrorKind, SnoozeError};
///
/// let err: anyhow::Error = SnoozeError::NotFound("story abc".into()).into();
/// assert_eq!(classify(&err), ErrorKind::NotFound);
/// ```
pub fn classify(err: &anyhow::Error) -> ErrorKind {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SnoozeError>())
        .map(SnoozeError::kind)
        .unwrap_or(ErrorKind::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_authentication_error_display() {
        let error = SnoozeError::Authentication("invalid password".to_string());
        assert_eq!(error.to_string(), "Authentication error: invalid password");
    }

    #[test]
    fn test_validation_error_display() {
        let error = SnoozeError::Validation("title is required".to_string());
        assert_eq!(error.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_network_error_display() {
        let error = SnoozeError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_not_found_error_display() {
        let error = SnoozeError::NotFound("story abc".to_string());
        assert_eq!(error.to_string(), "Not found: story abc");
    }

    #[test]
    fn test_classify_through_context() {
        let err = Err::<(), _>(SnoozeError::Validation("empty".into()))
            .context("submitting story")
            .unwrap_err();
        assert_eq!(classify(&err), ErrorKind::Validation);
    }

    #[test]
    fn test_classify_foreign_error_is_other() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(classify(&err), ErrorKind::Other);
    }

    #[test]
    fn test_storage_error_is_other() {
        assert_eq!(
            SnoozeError::Storage("disk full".into()).kind(),
            ErrorKind::Other
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SnoozeError = io_error.into();
        assert!(matches!(error, SnoozeError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: SnoozeError = json_error.into();
        assert!(matches!(error, SnoozeError::Serialization(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SnoozeError>();
    }
}
