//! Storage models.

use kura_compress::Compression;
use std::path::PathBuf;
use time::OffsetDateTime;

/// File metadata returned by storage backends.
///
/// This represents information about a file in storage, used for listing
/// operations and retention decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Relative path from storage root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified timestamp
    pub modified: OffsetDateTime,
    /// Detected compression format from file extension
    pub compression: Compression,
}

impl FileInfo {
    /// Create a new FileInfo from a listing operation.
    pub fn new(path: impl Into<PathBuf>, size: u64, modified: OffsetDateTime, compression: Compression) -> Self {
        Self { path: path.into(), size, modified, compression }
    }

    /// The final path component as a string, if it is valid UTF-8.
    ///
    /// Retention pruning sorts on this; paths produced by the backup
    /// filename generator are always UTF-8 so `None` only shows up for
    /// foreign files, which the pattern filter drops anyway.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}
