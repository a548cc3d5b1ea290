//! Transport Schema Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A codec error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The container could not be encoded. Indicates a bug rather than bad
    /// input; snapshots are built from already-validated domain data.
    #[display("failed to encode backup container")]
    Encode,
    /// The bytes are not a valid backup container. Don't retry with the
    /// same input.
    #[display("invalid or corrupted backup data")]
    Decode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
