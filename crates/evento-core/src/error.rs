// Error types for event operations

use thiserror::Error;

/// Result type alias for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors that can occur while validating or executing an event operation
#[derive(Debug, Error)]
pub enum EventError {
    /// Request payload failed validation (client error)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No event exists with the given id
    #[error("Event not found: {0}")]
    NotFound(i64),

    /// Store (database) error
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EventError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EventError::Validation(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        EventError::Store(msg.into())
    }

    /// Create a not found error
    pub fn not_found(id: i64) -> Self {
        EventError::NotFound(id)
    }
}
