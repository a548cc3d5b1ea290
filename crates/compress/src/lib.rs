//! Compression and decompression for backup artifacts.
//!
//! Backup files are written as gzip-compressed binary blobs, so this crate
//! only has two things to say: [`Gzip`](Compression::Gzip) and
//! [`None`](Compression::None) (pass-through, used when inspecting data that
//! is already decompressed). It provides:
//!
//! - **Format detection** from file extensions ([`Compression::from_path`])
//!   or magic bytes ([`Compression::from_magic_bytes`])
//! - **In-memory** compression/decompression ([`Compression::compress`],
//!   [`Compression::decompress`])
//!
//! Compression uses the highest gzip level; backup artifacts are written
//! rarely and read rarely, so storage space wins over speed.

mod detect;
pub mod error;
mod ops;

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A supported compression format.
///
/// Defaults to [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Gzip compression (.gz)
    Gzip,
}

impl Compression {
    /// Returns the file extension for this compression format.
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Compression::None => "",
            Compression::Gzip => ".gz",
        }
    }

    /// Returns the short name for configuration (for displaying to user)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
        }
    }
}

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Compression {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}
