//! Configuration loading and validation for kura.
//!
//! Settings are layered: hardcoded defaults, then a TOML file, then
//! `KURA_`-prefixed environment variables, each layer overriding the last.
//! The file lives at the platform config location by default
//! (`~/.config/kura/kura.toml` on Linux) but any path can be supplied.

pub mod error;
mod flags;

pub use crate::flags::BackupFlags;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use kura_compress::Compression;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "kura.toml";
const ENV_PREFIX: &str = "KURA_";

/// User-facing backup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory backups are written under.
    pub destination: PathBuf,
    /// Total number of scheduled backups to keep, the newest one included.
    pub retention: usize,
    /// Compression format name for the artifact stream.
    pub compression: String,
    /// Which export categories are included by default.
    pub flags: BackupFlags,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            retention: 2,
            compression: Compression::Gzip.as_str().to_string(),
            flags: BackupFlags::all(),
        }
    }
}

impl Settings {
    /// Load settings from the default config file location plus environment.
    pub fn load() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "kura").ok_or_raise(|| ErrorKind::NoConfigDir)?;
        Self::load_from(dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load settings from a specific TOML file plus environment.
    ///
    /// A missing file is fine; defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .or_raise(|| ErrorKind::Extract)?;
        settings.validated()
    }

    /// Parsed compression format.
    pub fn compression(&self) -> Result<Compression> {
        self.compression
            .parse::<Compression>()
            .or_raise(|| ErrorKind::InvalidValue(format!("compression: {}", self.compression)))
    }

    fn validated(self) -> Result<Self> {
        if self.retention == 0 {
            exn::bail!(ErrorKind::InvalidValue("retention must be at least 1".to_string()));
        }
        // Surface a bad compression name at load time, not mid-export.
        self.compression()?;
        tracing::debug!(retention = self.retention, destination = %self.destination.display(), "Settings loaded");
        Ok(self)
    }
}

fn default_destination() -> PathBuf {
    ProjectDirs::from("", "", "kura")
        .map(|dirs| dirs.data_dir().join("backups"))
        .unwrap_or_else(|| PathBuf::from("backups"))
}
