//! Error types for Solace
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Solace operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, credential management, session storage,
/// and exchanges with the model backend.
#[derive(Error, Debug)]
pub enum SolaceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend-related errors (request failures, bad responses)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Input validation errors (account creation, model selection)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors (unknown user, wrong password)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Session and credential storage errors
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

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Solace operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SolaceError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_backend_error_display() {
        let error = SolaceError::Backend("request timed out".to_string());
        assert_eq!(error.to_string(), "Backend error: request timed out");
    }

    #[test]
    fn test_validation_error_display() {
        let error = SolaceError::Validation("username too short".to_string());
        assert_eq!(error.to_string(), "Validation error: username too short");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = SolaceError::Authentication("wrong password".to_string());
        assert_eq!(error.to_string(), "Authentication error: wrong password");
    }

    #[test]
    fn test_storage_error_display() {
        let error = SolaceError::Storage("session file unreadable".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: session file unreadable"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SolaceError = io_error.into();
        assert!(matches!(error, SolaceError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: SolaceError = json_error.into();
        assert!(matches!(error, SolaceError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: SolaceError = yaml_error.into();
        assert!(matches!(error, SolaceError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SolaceError>();
    }
}
