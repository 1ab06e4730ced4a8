//! Error types and handling for Sirocco
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Sirocco operations
pub type Result<T> = std::result::Result<T, SiroccoError>;

/// Main error type for Sirocco
#[derive(Debug, Error)]
pub enum SiroccoError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Device address parsing errors
    #[error("Address error: {message}")]
    Address { message: String },

    /// Equipment-profile resolution errors
    #[error("Profile error: {message}")]
    Profile { message: String },

    /// Telegram decode errors
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Gateway/transport errors
    #[error("Gateway error: {message}")]
    Gateway { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl SiroccoError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SiroccoError::Config {
            message: message.into(),
        }
    }

    /// Create a new address error
    pub fn address<S: Into<String>>(message: S) -> Self {
        SiroccoError::Address {
            message: message.into(),
        }
    }

    /// Create a new profile error
    pub fn profile<S: Into<String>>(message: S) -> Self {
        SiroccoError::Profile {
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        SiroccoError::Decode {
            message: message.into(),
        }
    }

    /// Create a new gateway error
    pub fn gateway<S: Into<String>>(message: S) -> Self {
        SiroccoError::Gateway {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        SiroccoError::Io {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        SiroccoError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        SiroccoError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SiroccoError {
    fn from(err: std::io::Error) -> Self {
        SiroccoError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for SiroccoError {
    fn from(err: serde_yaml::Error) -> Self {
        SiroccoError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SiroccoError {
    fn from(err: serde_json::Error) -> Self {
        SiroccoError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SiroccoError::config("test config error");
        assert!(matches!(err, SiroccoError::Config { .. }));

        let err = SiroccoError::profile("test profile error");
        assert!(matches!(err, SiroccoError::Profile { .. }));

        let err = SiroccoError::validation("field", "test validation error");
        assert!(matches!(err, SiroccoError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = SiroccoError::config("test error");
        let error_string = format!("{}", err);
        assert_eq!(error_string, "Configuration error: test error");

        let err = SiroccoError::validation("test_field", "invalid value");
        let error_string = format!("{}", err);
        assert_eq!(error_string, "Validation error: test_field - invalid value");
    }
}
