//! Retention pruning for scheduled backups.
//!
//! Keeps the newest `retention` artifacts *including the one about to be
//! written*, so pruning runs before the write and keeps `retention - 1`
//! existing files. "Newest" is lexicographic on filename descending — the
//! naming scheme embeds a zero-padded UTC timestamp precisely so that name
//! order equals age order. Files not matching the naming scheme are never
//! touched.

use crate::error::{ErrorKind, Result};
use kura_model::filename;
use kura_storage::BackendHandle;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Delete backup artifacts in `dir` beyond the newest `retention - 1`.
///
/// Returns the deleted paths. A retention of 1 deletes every existing
/// artifact (the upcoming write will be the only one kept).
#[instrument(skip(backend), fields(backend = backend.name(), dir = %dir.display()))]
pub async fn prune(backend: &BackendHandle, dir: &Path, retention: usize) -> Result<Vec<PathBuf>> {
    let mut backups: Vec<PathBuf> = backend
        .list(dir)
        .await
        .map_err(ErrorKind::storage)?
        .into_iter()
        .filter(|info| info.file_name().is_some_and(filename::matches))
        .map(|info| info.path)
        .collect();

    // Name descending: newest first.
    backups.sort_unstable_by(|a, b| b.cmp(a));

    let mut deleted = Vec::new();
    for stale in backups.into_iter().skip(retention.saturating_sub(1)) {
        backend.delete(&stale).await.map_err(ErrorKind::storage)?;
        deleted.push(stale);
    }
    if !deleted.is_empty() {
        tracing::info!(count = deleted.len(), "Pruned old backups");
    }
    Ok(deleted)
}
