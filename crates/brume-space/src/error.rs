//! Error types for space construction.

use std::fmt;

/// Errors arising from space construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// Edge lengths must be finite and strictly positive.
    InvalidEdgeLengths {
        /// Human-readable description of the offending lengths.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEdgeLengths { reason } => write!(f, "invalid edge lengths: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
