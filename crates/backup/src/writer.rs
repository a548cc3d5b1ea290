//! The export orchestrator.
//!
//! A [`BackupWriter`] owns one of each collaborator and walks a single
//! create call through collecting, serializing, writing, and validating.
//! There is no retry at this layer; a scheduling layer that wants backoff
//! wraps the call. Once an artifact exists on storage, every subsequent
//! failure removes it (best-effort) before the error propagates, so a
//! failed export never leaves a partial file behind.

use crate::error::{ErrorKind, Result};
use crate::prefs;
use crate::retention;
use crate::snapshot::{self, snapshot_entry};
use crate::validate::ValidatorHandle;
use derive_more::Display;
use exn::ResultExt;
use kura_compress::Compression;
use kura_config::BackupFlags;
use kura_library::{PreferenceHandle, RegistryHandle, StoreHandle};
use kura_model::{Backup, BackupSourcePreferences, codec, filename};
use kura_storage::BackendHandle;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::instrument;

/// Subdirectory of the destination that scheduled backups land in.
const AUTOMATIC_DIR: &str = "automatic";

/// What kicked off the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Trigger {
    /// User-initiated export to an explicit file path.
    #[display("manual")]
    Manual,
    /// Scheduler-initiated export; the writer names the file and prunes
    /// older siblings.
    #[display("scheduled")]
    Scheduled,
}

/// Orchestrates a full backup export.
///
/// All collaborators are injected at construction; the writer itself holds
/// no state between calls, so one instance can serve many exports (to
/// *different* destinations — overlapping writes to the same destination
/// are the caller's problem to prevent).
pub struct BackupWriter {
    backend: BackendHandle,
    store: StoreHandle,
    preferences: PreferenceHandle,
    registry: RegistryHandle,
    validator: ValidatorHandle,
    compression: Compression,
    /// Total scheduled artifacts to keep, the new one included.
    retention: usize,
}

impl BackupWriter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        backend: BackendHandle,
        store: StoreHandle,
        preferences: PreferenceHandle,
        registry: RegistryHandle,
        validator: ValidatorHandle,
        compression: Compression,
        retention: usize,
    ) -> Self {
        Self {
            backend,
            store,
            preferences,
            registry,
            validator,
            compression,
            retention: retention.max(1),
        }
    }

    /// Export a backup to `destination` (relative to the backend root).
    ///
    /// For [`Trigger::Manual`], `destination` is the artifact path itself.
    /// For [`Trigger::Scheduled`], `destination` is a directory: the
    /// artifact is created under its `automatic/` subdirectory with a
    /// generated sortable name, after pruning older artifacts down to the
    /// retention count.
    ///
    /// Returns a string identifying the written location.
    #[instrument(skip(self, flags), fields(backend = self.backend.name(), %trigger, destination = %destination.display()))]
    pub async fn create(&self, destination: &Path, flags: &BackupFlags, trigger: Trigger) -> Result<String> {
        match self.create_inner(destination, flags, trigger).await {
            Ok(location) => Ok(location),
            Err(err) => {
                tracing::error!(error = %err, "Backup failed");
                Err(err)
            },
        }
    }

    async fn create_inner(&self, destination: &Path, flags: &BackupFlags, trigger: Trigger) -> Result<String> {
        if !self.backend.is_writable().await.map_err(ErrorKind::storage)? {
            exn::bail!(ErrorKind::PermissionDenied);
        }

        let backup = self.collect(flags).await?;
        let payload = codec::encode(&backup).or_raise(|| ErrorKind::Encode)?;
        // Checked before any file exists, so an empty payload never leaves
        // a destination file behind.
        ensure_payload(&payload)?;

        let path = self.resolve_destination(destination, trigger).await?;
        if self.backend.exists(&path).await.map_err(ErrorKind::storage)?
            && !self.backend.is_file(&path).await.map_err(ErrorKind::storage)?
        {
            exn::bail!(ErrorKind::NotAFile(path));
        }

        let compressed = self.compression.compress(&payload).or_raise(|| ErrorKind::Compress)?;

        // Once the write starts, an artifact (possibly truncated) may exist
        // on storage; any failure from here on removes it before propagating.
        if let Err(err) = self.commit(&path, &compressed).await {
            self.discard(&path).await;
            return Err(err);
        }

        tracing::info!(path = %path.display(), bytes = compressed.len(), "Backup written");
        Ok(path.display().to_string())
    }

    async fn commit(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.backend.write(path, data).await.map_err(ErrorKind::storage)?;
        self.validator.validate(&self.backend, path).await
    }

    /// Best-effort removal of a failed artifact. Cleanup failures are
    /// swallowed (logged only); the original error always wins.
    async fn discard(&self, path: &Path) {
        let cleanup = match self.backend.exists(path).await {
            Ok(false) => return,
            Ok(true) => self.backend.delete(path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = cleanup {
            tracing::warn!(error = %err, path = %path.display(), "Could not remove failed backup");
        }
    }

    /// Assemble the container. Every unset flag leaves its collection
    /// empty; the container shape never varies.
    async fn collect(&self, flags: &BackupFlags) -> Result<Backup> {
        let mut entries = self.store.favorites().await.map_err(ErrorKind::store)?;
        if flags.read_entries {
            entries.extend(self.store.read_non_library().await.map_err(ErrorKind::store)?);
        }

        let mut records = Vec::with_capacity(entries.len());
        for entry in &entries {
            records.push(snapshot_entry(self.store.as_ref(), entry, flags).await?);
        }

        // One stub per distinct source, in first-seen order.
        let mut seen = HashSet::new();
        let mut sources = Vec::new();
        for entry in &entries {
            if seen.insert(entry.source) {
                let info = self.registry.get_or_stub(entry.source).await.map_err(ErrorKind::store)?;
                sources.push(snapshot::source_record(&info));
            }
        }

        let categories = if flags.categories {
            self.store
                .categories()
                .await
                .map_err(ErrorKind::store)?
                .iter()
                .filter(|category| !category.is_system())
                .map(snapshot::category_record)
                .collect()
        } else {
            Vec::new()
        };

        let preferences = if flags.app_preferences {
            let values = self.preferences.all().await.map_err(ErrorKind::store)?;
            prefs::filter_preferences(&values, prefs::is_internal)
        } else {
            Vec::new()
        };

        let source_preferences = if flags.source_preferences {
            self.registry
                .source_preferences()
                .await
                .map_err(ErrorKind::store)?
                .into_iter()
                .map(|source| BackupSourcePreferences {
                    source_key: source.source_key,
                    preferences: prefs::filter_preferences(&source.values, prefs::is_internal),
                })
                .collect()
        } else {
            Vec::new()
        };

        let saved_searches = if flags.saved_searches {
            self.store
                .saved_searches()
                .await
                .map_err(ErrorKind::store)?
                .iter()
                .map(snapshot::search_record)
                .collect()
        } else {
            Vec::new()
        };

        Ok(Backup {
            entries: records,
            categories,
            sources,
            preferences,
            source_preferences,
            saved_searches,
        })
    }

    async fn resolve_destination(&self, destination: &Path, trigger: Trigger) -> Result<PathBuf> {
        match trigger {
            Trigger::Manual => kura_storage::validate_path(destination)
                .map_err(|e| e.raise(ErrorKind::DestinationUnavailable(destination.to_path_buf()))),
            Trigger::Scheduled => {
                let dir = kura_storage::validate_path(destination.join(AUTOMATIC_DIR))
                    .map_err(|e| e.raise(ErrorKind::DestinationUnavailable(destination.to_path_buf())))?;
                retention::prune(&self.backend, &dir, self.retention).await?;
                Ok(dir.join(filename::generate(OffsetDateTime::now_utc())))
            },
        }
    }
}

fn ensure_payload(payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        exn::bail!(ErrorKind::EmptyPayload);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{BackupValidator, StructuralValidator};
    use async_trait::async_trait;
    use kura_library::mock::{MemoryPreferences, MemoryStore, StaticRegistry};
    use kura_library::{
        Category, Chapter, History, LibraryEntry, RawPreference, SavedSearch, SourcePreferences, Track,
    };
    use kura_storage::backend::{LocalBackend, MockBackend};
    use kura_storage::{FileInfo, StorageBackend};
    use rstest::rstest;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn entry(id: i64, source: i64, favorite: bool) -> LibraryEntry {
        LibraryEntry {
            id,
            source,
            url: format!("/series/{id}"),
            title: format!("Series {id}"),
            author: None,
            artist: None,
            description: None,
            thumbnail_url: None,
            status: 1,
            favorite,
            local: false,
        }
    }

    fn chapter(id: i64, entry_id: i64) -> Chapter {
        Chapter {
            id,
            entry_id,
            url: format!("/chapter/{id}"),
            name: format!("Chapter {id}"),
            chapter_number: id as f32,
            read: false,
            bookmark: false,
            last_page_read: 0,
            scanlator: None,
            source_order: id,
        }
    }

    /// A store with one favorite (2 non-system categories, 3 chapters, one
    /// track, one history row), one read-but-unfavorited entry, and a saved
    /// search.
    fn populated_store() -> MemoryStore {
        MemoryStore::default()
            .with_favorite(entry(10, 7, true))
            .with_read_non_library(entry(20, 8, false))
            .with_category(Category { id: 0, name: "Default".to_string(), order: 0, system: true })
            .with_category(Category { id: 1, name: "Reading".to_string(), order: 1, system: false })
            .with_category(Category { id: 2, name: "Done".to_string(), order: 2, system: false })
            .with_membership(10, 1)
            .with_membership(10, 2)
            .with_chapter(chapter(1, 10))
            .with_chapter(chapter(2, 10))
            .with_chapter(chapter(3, 10))
            .with_track(Track {
                entry_id: 10,
                sync_id: 1,
                remote_id: 99,
                remote_url: "https://tracker.invalid/99".to_string(),
                title: "Series 10".to_string(),
                last_chapter_read: 3.0,
                total_chapters: 0,
                score: 9.0,
                status: 1,
            })
            .with_history(10, History { chapter_id: 3, last_read: 1_700_000_000_000, read_duration: 90_000 })
            .with_saved_search(SavedSearch {
                source: 7,
                name: "ongoing".to_string(),
                query: "status:ongoing".to_string(),
                filters: "{}".to_string(),
            })
    }

    fn preferences() -> MemoryPreferences {
        MemoryPreferences::default()
            .with("theme", RawPreference::Str("dark".to_string()))
            .with("__PRIVATE_token", RawPreference::Str("secret".to_string()))
    }

    fn registry() -> StaticRegistry {
        StaticRegistry::default().with_source(7, "Example").with_source_preferences(SourcePreferences {
            source_key: "source_7".to_string(),
            values: BTreeMap::from([("quality".to_string(), RawPreference::Int(3))]),
        })
    }

    fn writer(backend: BackendHandle) -> BackupWriter {
        BackupWriter::new(
            backend,
            Arc::new(populated_store()),
            Arc::new(preferences()),
            Arc::new(registry()),
            Arc::new(StructuralValidator),
            Compression::Gzip,
            3,
        )
    }

    async fn decode_artifact(backend: &BackendHandle, path: &Path) -> Backup {
        let raw = backend.read(path).await.unwrap();
        let payload = Compression::Gzip.decompress(&raw).unwrap();
        codec::decode(&payload).unwrap()
    }

    #[tokio::test]
    async fn test_manual_export_roundtrip() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        let location = writer
            .create(Path::new("manual/out.kbk.gz"), &BackupFlags::all(), Trigger::Manual)
            .await
            .unwrap();
        assert_eq!(location, "manual/out.kbk.gz");

        let backup = decode_artifact(&backend, Path::new("manual/out.kbk.gz")).await;
        // Favorite plus the read-but-unfavorited entry
        assert_eq!(backup.entries.len(), 2);
        assert_eq!(backup.entries[0].chapters.len(), 3);
        assert_eq!(backup.entries[0].categories, vec![1, 2]);
        assert_eq!(backup.entries[0].tracking.len(), 1);
        assert_eq!(backup.entries[0].history.len(), 1);
        assert_eq!(backup.entries[0].history[0].url, "/chapter/3");
        // Non-system categories only
        assert_eq!(backup.categories.len(), 2);
        // One known source, one stubbed
        assert_eq!(backup.sources.len(), 2);
        assert_eq!(backup.sources[0].name, "Example");
        assert!(backup.sources[1].name.contains("8"));
        // Private key filtered out
        assert_eq!(backup.preferences.len(), 1);
        assert_eq!(backup.preferences[0].key, "theme");
        assert_eq!(backup.source_preferences.len(), 1);
        assert_eq!(backup.saved_searches.len(), 1);
    }

    #[tokio::test]
    async fn test_no_flags_exports_favorites_only() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        writer.create(Path::new("out.kbk.gz"), &BackupFlags::none(), Trigger::Manual).await.unwrap();

        let backup = decode_artifact(&backend, Path::new("out.kbk.gz")).await;
        assert_eq!(backup.entries.len(), 1);
        assert!(backup.entries[0].chapters.is_empty());
        assert!(backup.categories.is_empty());
        assert!(backup.preferences.is_empty());
        assert!(backup.source_preferences.is_empty());
        assert!(backup.saved_searches.is_empty());
    }

    // Each container-level flag fills exactly its own collection.
    #[rstest]
    #[case::categories(BackupFlags { categories: true, ..BackupFlags::none() })]
    #[case::app_preferences(BackupFlags { app_preferences: true, ..BackupFlags::none() })]
    #[case::source_preferences(BackupFlags { source_preferences: true, ..BackupFlags::none() })]
    #[case::saved_searches(BackupFlags { saved_searches: true, ..BackupFlags::none() })]
    #[tokio::test]
    async fn test_flag_emptiness_correspondence(#[case] flags: BackupFlags) {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        writer.create(Path::new("out.kbk.gz"), &flags, Trigger::Manual).await.unwrap();

        let backup = decode_artifact(&backend, Path::new("out.kbk.gz")).await;
        assert_eq!(!backup.categories.is_empty(), flags.categories);
        assert_eq!(!backup.preferences.is_empty(), flags.app_preferences);
        assert_eq!(!backup.source_preferences.is_empty(), flags.source_preferences);
        assert_eq!(!backup.saved_searches.is_empty(), flags.saved_searches);
    }

    #[tokio::test]
    async fn test_read_entries_flag() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        writer
            .create(
                Path::new("out.kbk.gz"),
                &BackupFlags { read_entries: true, ..BackupFlags::none() },
                Trigger::Manual,
            )
            .await
            .unwrap();

        let backup = decode_artifact(&backend, Path::new("out.kbk.gz")).await;
        assert_eq!(backup.entries.len(), 2);
        assert!(!backup.entries[1].favorite);
    }

    #[tokio::test]
    async fn test_scheduled_export_names_and_prunes() {
        // Three existing artifacts, retention 3: the oldest goes, the two
        // newest stay, and the new artifact makes three total.
        let backend: BackendHandle = Arc::new(MockBackend::with_files([
            ("backups/automatic/kura_2026-08-01_00-00-00.kbk.gz", b"old".as_slice()),
            ("backups/automatic/kura_2026-08-02_00-00-00.kbk.gz", b"old".as_slice()),
            ("backups/automatic/kura_2026-08-03_00-00-00.kbk.gz", b"old".as_slice()),
        ]));
        let writer = writer(backend.clone());
        let location =
            writer.create(Path::new("backups"), &BackupFlags::all(), Trigger::Scheduled).await.unwrap();

        let mut names: Vec<String> = backend
            .list(Path::new("backups/automatic"))
            .await
            .unwrap()
            .iter()
            .filter_map(|f| f.file_name().map(str::to_string))
            .collect();
        names.sort_unstable();
        assert_eq!(names.len(), 3);
        // The survivors are the lexicographically greatest: the two newest
        // pre-existing plus the new artifact.
        assert_eq!(names[0], "kura_2026-08-02_00-00-00.kbk.gz");
        assert_eq!(names[1], "kura_2026-08-03_00-00-00.kbk.gz");
        assert!(kura_model::filename::matches(&names[2]));
        assert!(location.ends_with(&names[2]));
    }

    #[tokio::test]
    async fn test_scheduled_export_first_run() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        writer.create(Path::new("backups"), &BackupFlags::all(), Trigger::Scheduled).await.unwrap();
        let files = backend.list(Path::new("backups/automatic")).await.unwrap();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_read_only_destination_fails_before_any_work() {
        let backend: BackendHandle = Arc::new(MockBackend::default().read_only());
        let writer = writer(backend.clone());
        let err =
            writer.create(Path::new("out.kbk.gz"), &BackupFlags::all(), Trigger::Manual).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::PermissionDenied));
    }

    #[tokio::test]
    async fn test_dangling_history_fails_whole_export() {
        let store = MemoryStore::default()
            .with_favorite(entry(10, 7, true))
            .with_history(10, History { chapter_id: 404, last_read: 0, read_duration: 0 });
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = BackupWriter::new(
            backend.clone(),
            Arc::new(store),
            Arc::new(MemoryPreferences::default()),
            Arc::new(StaticRegistry::default()),
            Arc::new(StructuralValidator),
            Compression::Gzip,
            3,
        );
        let err =
            writer.create(Path::new("out.kbk.gz"), &BackupFlags::all(), Trigger::Manual).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Lookup));
        // Collection failed before anything touched storage.
        assert!(!backend.exists(Path::new("out.kbk.gz")).await.unwrap());
    }

    struct RejectingValidator;
    #[async_trait]
    impl BackupValidator for RejectingValidator {
        async fn validate(&self, _backend: &BackendHandle, _path: &Path) -> crate::error::Result<()> {
            exn::bail!(ErrorKind::Validation);
        }
    }

    /// Lands a truncated file and then reports the write as failed, the way
    /// a full disk does.
    struct TruncatingBackend {
        inner: MockBackend,
    }

    #[async_trait]
    impl StorageBackend for TruncatingBackend {
        fn name(&self) -> &str {
            self.inner.name()
        }
        async fn is_writable(&self) -> kura_storage::error::Result<bool> {
            self.inner.is_writable().await
        }
        async fn exists(&self, path: &Path) -> kura_storage::error::Result<bool> {
            self.inner.exists(path).await
        }
        async fn is_file(&self, path: &Path) -> kura_storage::error::Result<bool> {
            self.inner.is_file(path).await
        }
        async fn read(&self, path: &Path) -> kura_storage::error::Result<Vec<u8>> {
            self.inner.read(path).await
        }
        async fn read_head(&self, path: &Path, bytes: usize) -> kura_storage::error::Result<Vec<u8>> {
            self.inner.read_head(path, bytes).await
        }
        async fn write(&self, path: &Path, data: &[u8]) -> kura_storage::error::Result<()> {
            self.inner.write(path, &data[..data.len() / 2]).await?;
            exn::bail!(kura_storage::error::ErrorKind::Io(std::io::Error::other("no space left")));
        }
        async fn delete(&self, path: &Path) -> kura_storage::error::Result<()> {
            self.inner.delete(path).await
        }
        async fn list(&self, dir: &Path) -> kura_storage::error::Result<Vec<FileInfo>> {
            self.inner.list(dir).await
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_artifact() {
        let backend: BackendHandle = Arc::new(TruncatingBackend { inner: MockBackend::default() });
        let writer = BackupWriter::new(
            backend.clone(),
            Arc::new(populated_store()),
            Arc::new(preferences()),
            Arc::new(registry()),
            Arc::new(StructuralValidator),
            Compression::Gzip,
            3,
        );
        let err =
            writer.create(Path::new("out.kbk.gz"), &BackupFlags::all(), Trigger::Manual).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Storage));
        // The truncated artifact was removed on the way out.
        assert!(!backend.exists(Path::new("out.kbk.gz")).await.unwrap());
    }

    #[tokio::test]
    async fn test_validation_failure_removes_artifact() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = BackupWriter::new(
            backend.clone(),
            Arc::new(populated_store()),
            Arc::new(preferences()),
            Arc::new(registry()),
            Arc::new(RejectingValidator),
            Compression::Gzip,
            3,
        );
        let err =
            writer.create(Path::new("out.kbk.gz"), &BackupFlags::all(), Trigger::Manual).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Validation));
        assert!(!backend.exists(Path::new("out.kbk.gz")).await.unwrap());
    }

    #[tokio::test]
    async fn test_destination_must_be_regular_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("target.kbk.gz")).unwrap();
        let backend: BackendHandle = Arc::new(LocalBackend::new("local", temp_dir.path()).unwrap());
        let writer = writer(backend.clone());
        let err =
            writer.create(Path::new("target.kbk.gz"), &BackupFlags::all(), Trigger::Manual).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotAFile(_)));
    }

    #[tokio::test]
    async fn test_invalid_destination_is_unavailable() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        let err = writer
            .create(Path::new("../outside.kbk.gz"), &BackupFlags::all(), Trigger::Manual)
            .await
            .unwrap_err();
        assert!(matches!(&*err, ErrorKind::DestinationUnavailable(_)));
    }

    #[test]
    fn test_empty_payload_guard() {
        // The guard runs before the destination is even resolved, so an
        // empty payload can never leave a file behind.
        let err = ensure_payload(&[]).unwrap_err();
        assert!(matches!(&*err, ErrorKind::EmptyPayload));
        assert!(ensure_payload(b"x").is_ok());
    }

    #[tokio::test]
    async fn test_artifact_is_gzip() {
        let backend: BackendHandle = Arc::new(MockBackend::default());
        let writer = writer(backend.clone());
        writer.create(Path::new("out.kbk.gz"), &BackupFlags::all(), Trigger::Manual).await.unwrap();
        let head = backend.read_head(Path::new("out.kbk.gz"), 2).await.unwrap();
        assert_eq!(head, [0x1F, 0x8B]);
    }
}
