//! Error types for signed timecode operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for signed timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Errors that can occur while parsing, converting or combining timecodes.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// An operand or argument had a kind the operation does not accept.
    #[error("Type {found} not supported for {operation}")]
    TypeMismatch {
        /// The operation that rejected the value.
        operation: String,
        /// Description of the rejected value.
        found: String,
    },

    /// A 1-based frame count was not positive.
    #[error("Frame count should be an integer greater than 0, but is {value}")]
    InvalidFrameCount {
        /// The rejected frame count.
        value: i64,
    },

    /// The value handed to the timecode parser is not a timecode.
    #[error("Type {kind} not supported as timecode")]
    UnsupportedTimecodeInput {
        /// Description of the rejected input.
        kind: String,
    },

    /// Malformed timecode text or packed timecode word.
    #[error("Invalid timecode format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// Framerate specifier could not be resolved to a positive rate.
    #[error("Invalid frame rate: {spec}")]
    InvalidFrameRate {
        /// The specifier as given.
        spec: String,
    },

    /// Division of a frame count by zero.
    #[error("Division by zero frames")]
    DivisionByZero,

    /// Frame count arithmetic left the i64 range.
    #[error("Timecode overflow")]
    Overflow,
}

impl TimecodeError {
    /// Create a type mismatch error.
    pub fn type_mismatch(operation: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            operation: operation.into(),
            found: found.into(),
        }
    }

    /// Create an invalid frame count error.
    pub fn invalid_frame_count(value: i64) -> Self {
        Self::InvalidFrameCount { value }
    }

    /// Create an unsupported timecode input error.
    pub fn unsupported_input(kind: impl Into<String>) -> Self {
        Self::UnsupportedTimecodeInput { kind: kind.into() }
    }

    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an invalid frame rate error.
    pub fn invalid_frame_rate(spec: impl Into<String>) -> Self {
        Self::InvalidFrameRate { spec: spec.into() }
    }
}
