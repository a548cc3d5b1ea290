//! Backup Pipeline Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Collaborator failures are wrapped so the inner error
//! tree survives as a child of the pipeline-level kind.

use derive_more::{Display, Error};
use kura_library::error::ErrorKind as StoreErrorKind;
use kura_storage::error::ErrorKind as StorageErrorKind;
use std::path::PathBuf;

/// A backup pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for backup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The destination cannot be written to at all. Checked before any
    /// collection work begins.
    #[display("backup destination is not writable")]
    PermissionDenied,
    /// The destination path could not be resolved to a usable location.
    #[display("could not resolve backup destination: {}", _0.display())]
    DestinationUnavailable(#[error(not(source))] PathBuf),
    /// The encoded container came out empty; nothing was written.
    #[display("encoded backup is empty")]
    EmptyPayload,
    /// The destination exists but is not a regular file.
    #[display("backup destination is not a regular file: {}", _0.display())]
    NotAFile(#[error(not(source))] PathBuf),
    /// The written artifact failed the post-write structural check.
    #[display("written backup failed validation")]
    Validation,
    /// A record referenced by another record could not be resolved
    /// (e.g. a history row whose chapter is gone). Fails the whole export.
    #[display("failed to resolve a referenced record")]
    Lookup,
    /// The library store failed to answer a query.
    #[display("library store query failed")]
    Store,
    /// A storage operation failed.
    #[display("storage operation failed")]
    Storage,
    /// The container could not be encoded.
    #[display("failed to encode backup container")]
    Encode,
    /// The payload could not be compressed.
    #[display("failed to compress backup payload")]
    Compress,
}

impl ErrorKind {
    /// Wrap a library store error, promoting missing-reference failures to
    /// [`Lookup`](ErrorKind::Lookup) and keeping the store's error tree as
    /// a child.
    #[track_caller]
    pub fn store(err: kura_library::error::Error) -> Error {
        match &*err {
            StoreErrorKind::ChapterNotFound(_) => err.raise(ErrorKind::Lookup),
            _ => err.raise(ErrorKind::Store),
        }
    }

    /// Wrap a storage error, promoting permission failures to
    /// [`PermissionDenied`](ErrorKind::PermissionDenied).
    #[track_caller]
    pub fn storage(err: kura_storage::error::Error) -> Error {
        match &*err {
            StorageErrorKind::PermissionDenied(_) => err.raise(ErrorKind::PermissionDenied),
            _ => err.raise(ErrorKind::Storage),
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store | Self::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_wrapping_promotes_lookup() {
        let inner: kura_library::error::Error = exn::Exn::from(StoreErrorKind::ChapterNotFound(42));
        let err = ErrorKind::store(inner);
        assert!(matches!(&*err, ErrorKind::Lookup));

        let inner: kura_library::error::Error = exn::Exn::from(StoreErrorKind::Query("boom".to_string()));
        let err = ErrorKind::store(inner);
        assert!(matches!(&*err, ErrorKind::Store));
    }

    #[test]
    fn test_storage_wrapping_promotes_permission() {
        let inner: kura_storage::error::Error =
            exn::Exn::from(StorageErrorKind::PermissionDenied(PathBuf::from("x")));
        let err = ErrorKind::storage(inner);
        assert!(matches!(&*err, ErrorKind::PermissionDenied));
    }
}
