//! Error types for the Appercode SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use appercode::{ProjectCode, ConfigError};
//!
//! let result = ProjectCode::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyProjectCode)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Server URL is invalid.
    #[error("Invalid server URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.appercode.com').")]
    InvalidServerUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Project code cannot be empty.
    #[error("Project code cannot be empty. Please provide a valid Appercode project code.")]
    EmptyProjectCode,

    /// Project code contains characters that are not valid in a URL segment.
    #[error("Invalid project code '{code}'. Expected letters, digits, '-' or '_'.")]
    InvalidProjectCode {
        /// The invalid project code that was provided.
        code: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_server_url_error_message() {
        let error = ConfigError::InvalidServerUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("valid URL"));
    }

    #[test]
    fn test_empty_project_code_error_message() {
        let error = ConfigError::EmptyProjectCode;
        let message = error.to_string();
        assert!(message.contains("Project code cannot be empty"));
    }

    #[test]
    fn test_invalid_project_code_error_message() {
        let error = ConfigError::InvalidProjectCode {
            code: "bad code!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad code!"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "server" };
        let message = error.to_string();
        assert!(message.contains("server"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_config_error_is_clone_and_eq() {
        let error = ConfigError::EmptyProjectCode;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
