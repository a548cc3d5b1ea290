//! Configuration Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No platform config directory could be determined.
    #[display("could not determine a configuration directory")]
    NoConfigDir,
    /// The configuration sources could not be merged/deserialized.
    #[display("failed to read configuration")]
    Extract,
    /// A setting has a value outside its accepted range.
    #[display("invalid setting: {_0}")]
    InvalidValue(#[error(not(source))] String),
}
