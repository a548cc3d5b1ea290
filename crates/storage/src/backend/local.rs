//! Local filesystem storage backend.
//!
//! Artifacts live under a single root directory; every path handed to the
//! trait methods is validated and joined onto that root, so nothing this
//! backend does can escape it.

use crate::error::{ErrorKind, Result};
use crate::{FileInfo, StorageBackend, validate_path};
use async_trait::async_trait;
use kura_compress::Compression;
use std::fs::Metadata;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Storage backend rooted at a directory on the local filesystem.
///
/// # Examples
///
/// ```no_run
/// use kura_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("local", "/var/lib/kura/backups")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalBackend {
    name: String,
    root: PathBuf,
}

impl LocalBackend {
    /// Create a backend rooted at `root`, which must be an absolute path.
    /// The directory is created if it does not exist yet.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            // Synchronous on purpose: this runs once, when the destination
            // is first configured, and an async constructor isn't worth it.
            std::fs::create_dir_all(&root).map_err(|e| Self::classify(e, &root))?;
        }
        Ok(Self { name: name.into(), root })
    }

    /// Validate a storage-relative path and anchor it under the root.
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.root.join(validate_path(path)?))
    }

    fn classify(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            IoErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    fn info(path: &Path, metadata: &Metadata) -> Result<FileInfo> {
        let modified = metadata.modified().map_err(ErrorKind::Io)?.into();
        Ok(FileInfo::new(path, metadata.len(), modified, Compression::from_path(path)))
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_writable(&self) -> Result<bool> {
        let metadata = fs::metadata(&self.root).await.map_err(|e| Self::classify(e, &self.root))?;
        Ok(!metadata.permissions().readonly())
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let target = self.resolve(path)?;
        Ok(fs::try_exists(&target).await.map_err(ErrorKind::Io)?)
    }

    async fn is_file(&self, path: &Path) -> Result<bool> {
        let target = self.resolve(path)?;
        match fs::metadata(&target).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(exn::Exn::from(Self::classify(e, path))),
        }
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let target = self.resolve(path)?;
        Ok(fs::read(&target).await.map_err(|e| Self::classify(e, path))?)
    }

    async fn read_head(&self, path: &Path, bytes: usize) -> Result<Vec<u8>> {
        let target = self.resolve(path)?;
        let file = fs::File::open(&target).await.map_err(|e| Self::classify(e, path))?;
        let mut head = Vec::with_capacity(bytes);
        file.take(bytes as u64).read_to_end(&mut head).await.map_err(ErrorKind::Io)?;
        Ok(head)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Self::classify(e, path))?;
        }
        // fs::write truncates, which is the overwrite behaviour the trait
        // contract promises.
        Ok(fs::write(&target, data).await.map_err(|e| Self::classify(e, path))?)
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        let target = self.resolve(path)?;
        Ok(fs::remove_file(&target).await.map_err(|e| Self::classify(e, path))?)
    }

    async fn list(&self, dir: &Path) -> Result<Vec<FileInfo>> {
        let target = self.resolve(dir)?;
        let mut entries = match fs::read_dir(&target).await {
            Ok(entries) => entries,
            // The first scheduled run lists the automatic directory before
            // anything ever created it; that's an empty listing, not an error.
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(exn::Exn::from(Self::classify(e, dir))),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| Self::classify(e, dir))? {
            let metadata = entry.metadata().await.map_err(|e| Self::classify(e, &entry.path()))?;
            if metadata.is_file() {
                files.push(Self::info(&dir.join(entry.file_name()), &metadata)?);
            }
        }
        Ok(files)
    }
}
