//! In-memory storage backend for tests.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::file::FileInfo;
use crate::path::validate as validate_path;
use kura_compress::Compression;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::sync::RwLock;

struct StoredFile {
    modified: OffsetDateTime,
    data: Vec<u8>,
}

/// A [`StorageBackend`] holding its files in a map behind a lock, so tests
/// never touch the real filesystem.
///
/// # Examples
///
/// ```
/// use kura_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_files([
///     ("automatic/kura_2026-01-01_00-00-00.kbk.gz", b"..."),
/// ]);
/// assert!(backend.exists(Path::new("automatic/kura_2026-01-01_00-00-00.kbk.gz")).await?);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    writable: bool,
    files: RwLock<HashMap<PathBuf, StoredFile>>,
}

impl MockBackend {
    /// Create a backend pre-seeded with files.
    ///
    /// Panics on a path that fails validation; a test fixture with a bad
    /// path should fail loudly, not surface later as a backend error.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let modified = OffsetDateTime::now_utc();
        let files = files
            .into_iter()
            .map(|(path, data)| {
                let path = path.into();
                match validate_path(&path) {
                    Ok(validated) => (validated, StoredFile { modified, data: data.into() }),
                    Err(_) => panic!("MockBackend::with_files: invalid path {}", path.display()),
                }
            })
            .collect();
        Self { name: "mock".to_string(), writable: true, files: RwLock::new(files) }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Refuse all writes and report as non-writable, for exercising the
    /// fail-before-any-work path.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::with_files(std::iter::empty::<(PathBuf, Vec<u8>)>())
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_writable(&self) -> Result<bool> {
        Ok(self.writable)
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.files.read().await.contains_key(&path))
    }

    async fn is_file(&self, path: &Path) -> Result<bool> {
        // The map only ever holds regular files.
        self.exists(path).await
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        match self.files.read().await.get(&path) {
            Some(file) => Ok(file.data.clone()),
            None => exn::bail!(ErrorKind::NotFound(path)),
        }
    }

    async fn read_head(&self, path: &Path, bytes: usize) -> Result<Vec<u8>> {
        let mut data = self.read(path).await?;
        data.truncate(bytes);
        Ok(data)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = validate_path(path)?;
        if !self.writable {
            exn::bail!(ErrorKind::PermissionDenied(path));
        }
        let file = StoredFile { modified: OffsetDateTime::now_utc(), data: data.to_vec() };
        self.files.write().await.insert(path, file);
        Ok(())
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        let path = validate_path(path)?;
        if !self.writable {
            exn::bail!(ErrorKind::PermissionDenied(path));
        }
        match self.files.write().await.remove(&path) {
            Some(_) => Ok(()),
            None => exn::bail!(ErrorKind::NotFound(path)),
        }
    }

    async fn list(&self, dir: &Path) -> Result<Vec<FileInfo>> {
        let dir = validate_path(dir)?;
        Ok(self
            .files
            .read()
            .await
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir.as_path()))
            .map(|(path, file)| {
                FileInfo::new(path, file.data.len() as u64, file.modified, Compression::from_path(path))
            })
            .collect())
    }
}
