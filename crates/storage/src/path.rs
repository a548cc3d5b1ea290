//! Storage path validation.
//!
//! Every path a backend receives is relative to its root; this module
//! makes sure it stays that way.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validate a storage-relative path, resolving `.`/`..` components and
/// rejecting anything that would climb out of the storage root.
///
/// Returns the normalized relative path, or
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath) when the path
/// escapes the root, normalizes to nothing, or contains a null byte.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use kura_storage::validate_path;
/// // Valid paths
/// assert!(validate_path("automatic/kura_2026-01-01_00-00-00.kbk.gz").is_ok());
/// assert!(validate_path("a/b/backup.kbk.gz").is_ok());
/// assert!(validate_path("a/../backup.kbk.gz").is_ok()); // (never leaves storage root)
/// // Invalid paths
/// assert!(validate_path("../etc/passwd").is_err());
/// assert!(validate_path("a/../../b").is_err()); // (leaves storage root)
/// assert!(validate_path("a\0b").is_err());
/// // Paths get resolved
/// assert_eq!(
///     validate_path("wrong/../still-wrong/.././correct//./path.kbk/").unwrap(),
///     Path::new("correct/path.kbk")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    // Component-based rather than string-based: the stdlib parser already
    // handles separators, non-UTF8 segments, and repeated slashes.
    let mut components = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but cause
                // truncation in C-based syscalls — reject them explicitly.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf()));
                }
            },
        }
    }
    match components.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.as_ref().to_path_buf())),
        false => Ok(components.into_iter().collect()),
    }
}
