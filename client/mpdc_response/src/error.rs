//! Error types for response scanning

use std::fmt;
use thiserror::Error;

/// Direction of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the end of the response
    Forward,
    /// Towards the start of the response
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// Errors that can occur while building or driving a scanner
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The caller asked to start before the first character
    #[error("Scanner position must not be negative, got {0}")]
    NegativePosition(isize),

    /// The caller asked to start past the end of the response
    #[error("Scanner position {position} is past the end of a {len} byte response")]
    PositionOutOfRange {
        /// Requested start offset
        position: usize,
        /// Length of the response text
        len: usize,
    },

    /// The caller asked to start inside a multi-byte character
    #[error("Scanner position {0} is not on a character boundary")]
    NotCharBoundary(usize),

    /// No further record exists in the requested direction
    #[error("No more records {direction}")]
    Exhausted {
        /// The direction in which the scanner ran out of records
        direction: Direction,
    },
}

/// Result type for scanner operations
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    /// Returns true if this error only reports that traversal is finished.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ScanError::Exhausted { .. })
    }
}
