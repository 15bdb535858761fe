//! Error types for the home cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error ==
/// Failure reported by a key-value store backend.
///
/// Backends only carry a human-readable message; classification into
/// transient and non-transient failures happens in the guarded store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Result type returned by store backends.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The host application is not in the foreground; the store was not touched
    #[error("Operation skipped: application is not in the foreground")]
    Backgrounded,

    /// The store rejected the call because the app lacks interaction rights
    #[error("Interaction not allowed: {0}")]
    InteractionNotAllowed(String),

    /// Any other store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    // == Is Silent ==
    /// Returns true for failures that are expected while the app is backgrounded
    /// and are therefore never reported above debug level.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            CacheError::Backgrounded | CacheError::InteractionNotAllowed(_)
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
