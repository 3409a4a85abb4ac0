//! Error types for the address book

use thiserror::Error;

/// Main error type for the address book
#[derive(Error, Debug)]
pub enum AddrbookError {
    // ============ Store Errors ============
    #[error("Duplicate address id: {0}")]
    DuplicateId(String),

    #[error("Unsupported snapshot format: expected {expected}, got {got}")]
    SnapshotFormat { expected: u32, got: u32 },

    // ============ Input Errors ============
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // ============ Configuration Errors ============
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),

    // ============ General Errors ============
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AddrbookError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AddrbookError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for AddrbookError {
    fn from(err: std::io::Error) -> Self {
        AddrbookError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AddrbookError {
    fn from(err: serde_json::Error) -> Self {
        AddrbookError::SerializationError(err.to_string())
    }
}
