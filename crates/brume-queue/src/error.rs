//! Queue addressing errors.

use std::error::Error;
use std::fmt;

use crate::dynamic::{Index, Serial};

/// Errors from addressing a queue item that is not queued.
///
/// Both variants signal a bookkeeping bug in the caller: a handle was used
/// after its item was popped, or was never issued by this queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// No queued item carries this serial.
    UnknownSerial {
        /// The serial that was looked up.
        serial: Serial,
    },
    /// The index is out of range or names a free storage slot.
    InvalidIndex {
        /// The index that was looked up.
        index: Index,
    },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSerial { serial } => write!(f, "no queued item with serial {serial}"),
            Self::InvalidIndex { index } => write!(f, "index {index} does not hold a queued item"),
        }
    }
}

impl Error for QueueError {}
