//! Error conversion implementations for UtilkitError
//!
//! This module provides From trait implementations for converting
//! external error types into UtilkitError.

use super::types::UtilkitError;

// Async/Task error conversions
impl From<tokio::task::JoinError> for UtilkitError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            UtilkitError::internal("Task was cancelled")
        } else if err.is_panic() {
            UtilkitError::internal("Task panicked")
        } else {
            UtilkitError::internal(format!("Task failed: {}", err))
        }
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for UtilkitError {
    fn from(err: tokio::sync::oneshot::error::RecvError) -> Self {
        UtilkitError::internal(format!("Channel receive failed: {}", err))
    }
}

// Configuration error conversions
impl From<toml::de::Error> for UtilkitError {
    fn from(err: toml::de::Error) -> Self {
        UtilkitError::configuration("toml", format!("Failed to parse TOML: {}", err.message()))
            .with_cause(err)
    }
}

impl From<toml::ser::Error> for UtilkitError {
    fn from(err: toml::ser::Error) -> Self {
        UtilkitError::configuration("toml", format!("Failed to serialize TOML: {}", err))
            .with_cause(err)
    }
}

// Serialization error conversions
impl From<serde_json::Error> for UtilkitError {
    fn from(err: serde_json::Error) -> Self {
        UtilkitError::internal(format!("JSON error: {}", err)).with_cause(err)
    }
}
