//! Post-write structural validation.
//!
//! After an artifact lands on storage it is re-opened and checked: the
//! compression layer must decode, the container must decode, and the
//! container must not be empty. Catching a corrupt write here — while the
//! data it was built from still exists — is the whole point of the
//! validating stage.

use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use kura_compress::Compression;
use kura_model::codec;
use kura_storage::BackendHandle;
use std::path::Path;
use std::sync::Arc;

pub type ValidatorHandle = Arc<dyn BackupValidator + Send + Sync>;

/// Structural check on a written backup artifact.
#[async_trait]
pub trait BackupValidator {
    async fn validate(&self, backend: &BackendHandle, path: &Path) -> Result<()>;
}

/// The default validator: decompress, decode, reject empty containers.
///
/// Detects the compression layer from magic bytes rather than trusting the
/// extension, so a truncated or mislabeled artifact fails here instead of
/// at restore time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

#[async_trait]
impl BackupValidator for StructuralValidator {
    async fn validate(&self, backend: &BackendHandle, path: &Path) -> Result<()> {
        let raw = backend.read(path).await.map_err(ErrorKind::storage)?;
        let compression = Compression::from_magic_bytes(&raw);
        let payload = compression.decompress(&raw).or_raise(|| ErrorKind::Validation)?;
        let backup = codec::decode(&payload).or_raise(|| ErrorKind::Validation)?;
        if backup.is_empty() {
            exn::bail!(ErrorKind::Validation);
        }
        tracing::debug!(path = %path.display(), entries = backup.entries.len(), "Backup validated");
        Ok(())
    }
}
