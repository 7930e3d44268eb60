//! Error types for the store layer.

use thiserror::Error;
use wordmem_core::SchedulerError;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by persistence, import and session driving.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed persisted or imported JSON. The diagnostic is truncated
    /// so an arbitrarily large payload never floods a caller-facing
    /// message; the whole operation fails, nothing is committed.
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

impl StoreError {
    const DIAGNOSTIC_LIMIT: usize = 50;

    pub fn invalid_format(err: &serde_json::Error) -> Self {
        let message: String = err.to_string().chars().take(Self::DIAGNOSTIC_LIMIT).collect();
        Self::InvalidFormat { message }
    }
}
