//! Error types for memokit

use std::fmt;

/// Result type alias for memokit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache and tree operations
///
/// Absence of a key or value is never an error; lookups return `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache constructed with a capacity that can never hold an entry
    InvalidCapacity(usize),

    /// Handle does not refer to a live node of this structure
    InvalidHandle(usize),

    /// Structural operation invoked on a node that cannot support it
    PreconditionViolated(&'static str),

    /// Point index outside the backing array
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Length of the backing array
        len: usize,
    },

    /// Range is reversed or extends past the backing array
    InvalidRange {
        /// Left bound (inclusive)
        left: usize,
        /// Right bound (inclusive)
        right: usize,
        /// Length of the backing array
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(cap) => write!(f, "Invalid capacity: {} (must be at least 1)", cap),
            Error::InvalidHandle(idx) => write!(f, "Invalid handle: slot {} is not a live node", idx),
            Error::PreconditionViolated(msg) => write!(f, "Precondition violated: {}", msg),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index out of bounds: {} (len {})", index, len)
            }
            Error::InvalidRange { left, right, len } => {
                write!(f, "Invalid range: [{}, {}] (len {})", left, right, len)
            }
        }
    }
}

impl std::error::Error for Error {}
