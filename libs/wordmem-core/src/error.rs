//! Error types for wordmem-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors that can occur inside the scheduler core.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("grade {value} is outside the 0-5 scale")]
    InvalidGrade { value: u8 },

    #[error("no exercise is awaiting an outcome")]
    NoExerciseInFlight,
}
