//! Storage backend trait and implementations.
//!
//! This module defines the `StorageBackend` trait, which provides a unified
//! interface for the places a backup artifact can land (local filesystem in
//! production, in-memory mock in tests).

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use crate::file::FileInfo;
use async_trait::async_trait;
use std::path::Path;

/// Unified interface for storage backends.
///
/// All storage operations are asynchronous. Implementations hold a root
/// location; every path passed in is relative to that root and must survive
/// [`validate_path`](crate::validate_path) (implementations enforce this).
///
/// Writes use truncate semantics: writing to an existing path replaces its
/// contents entirely, never appends.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use kura_storage::{StorageBackend, error::Result};
///
/// async fn looks_like_gzip(backend: &dyn StorageBackend, path: &Path) -> Result<bool> {
///     let head = backend.read_head(path, 2).await?;
///     Ok(head == [0x1F, 0x8B])
/// }
/// ```
#[async_trait]
pub trait StorageBackend {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Whether the backend root can be written to at all.
    ///
    /// Probed once before an export does any work, so a read-only
    /// destination fails fast instead of after collection.
    async fn is_writable(&self) -> Result<bool>;

    /// Whether a file exists at the given path.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Whether the path resolves to a regular file (not a directory or
    /// anything more exotic). Returns `false` for nonexistent paths.
    async fn is_file(&self, path: &Path) -> Result<bool>;

    /// Read the entire contents of a file.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Read at most the first `bytes` bytes of a file.
    async fn read_head(&self, path: &Path, bytes: usize) -> Result<Vec<u8>>;

    /// Write data to a file, truncating any existing contents and creating
    /// parent directories as needed.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Delete a file.
    async fn delete(&self, path: &Path) -> Result<()>;

    /// List the files directly inside `dir` (non-recursive).
    ///
    /// A nonexistent directory lists as empty rather than erroring, so
    /// callers don't have to special-case the first ever scheduled run.
    async fn list(&self, dir: &Path) -> Result<Vec<FileInfo>>;
}
