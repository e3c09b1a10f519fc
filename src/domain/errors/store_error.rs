//! Durable record store error types.

use thiserror::Error;

/// Record store error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("record store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record at {location}: {message}")]
    Corrupt { location: String, message: String },

    #[error("failed to serialize record: {0}")]
    Serialization(String),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates corrupt record error.
    #[must_use]
    pub fn corrupt(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            location: location.into(),
            message: message.into(),
        }
    }
}
