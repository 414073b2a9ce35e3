//! Error types and handling for fix-conflict resolution
//!
//! The engine itself is infallible: every error-like condition is data (a
//! skip reason, a missing range, a fallback resolution). Errors only arise
//! at the crate's boundary, when parsing configuration values or exporting
//! results.

use thiserror::Error;

/// Main error type for refyne operations
#[derive(Debug, Error)]
pub enum RefyneError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Serialization errors when exporting results for reporting
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Serialization,
}

impl RefyneError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RefyneError::ConfigError { .. } => ErrorKind::Config,
            RefyneError::SerializationError { .. } => ErrorKind::Serialization,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}
