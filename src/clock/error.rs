//! Clock error types
//!
//! The alarm state machine has exactly two failure modes, both produced
//! by `arm`: the user supplied text that is not a valid `HH:MM` time, or
//! the target is not strictly in the future. Every other operation is
//! total over its state domain.

use thiserror::Error;

/// Errors that can occur when arming an alarm
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Missing or malformed alarm time (expected `HH:MM`, 24-hour)
    #[error("Invalid alarm time: {0}")]
    InvalidInput(String),

    /// Target is equal to or earlier than the current wall-clock time
    #[error("Alarm time must be strictly in the future")]
    PastTime,
}

/// Result type alias for clock operations
pub type ClockResult<T> = Result<T, ClockError>;
