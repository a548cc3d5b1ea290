//! Collaborator interfaces consumed by the backup pipeline.
//!
//! These are query surfaces only; the pipeline never writes through them.
//! Every method is an independent await point — implementations may suspend
//! per call, but the pipeline issues them strictly sequentially.

use crate::error::Result;
use crate::models::{
    Category, Chapter, History, LibraryEntry, RawPreference, SavedSearch, SourceInfo, SourcePreferences, Track,
};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Read access to the structured library store.
#[async_trait]
pub trait LibraryStore {
    /// All entries in the user's library.
    async fn favorites(&self) -> Result<Vec<LibraryEntry>>;

    /// Entries that are not in the library but have at least one read
    /// chapter. Only consulted when the read-entries flag is set.
    async fn read_non_library(&self) -> Result<Vec<LibraryEntry>>;

    /// All categories, system ones included; callers filter.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Categories a single entry belongs to.
    async fn categories_of(&self, entry_id: i64) -> Result<Vec<Category>>;

    /// Chapters of a single entry, in source order.
    async fn chapters_of(&self, entry_id: i64) -> Result<Vec<Chapter>>;

    /// Resolve a chapter by id.
    ///
    /// Fails with [`ChapterNotFound`](crate::error::ErrorKind::ChapterNotFound)
    /// when the row is gone — the history join depends on this and the
    /// export deliberately propagates the failure instead of skipping.
    async fn chapter_by_id(&self, chapter_id: i64) -> Result<Chapter>;

    /// Tracking records of a single entry.
    async fn tracks_of(&self, entry_id: i64) -> Result<Vec<Track>>;

    /// Reading history of a single entry.
    async fn history_of(&self, entry_id: i64) -> Result<Vec<History>>;

    /// All saved searches.
    async fn saved_searches(&self) -> Result<Vec<SavedSearch>>;
}

/// Read access to the application preference store.
#[async_trait]
pub trait PreferenceStore {
    /// Every key-value pair currently in the store, including kinds and
    /// keys a backup will never carry; filtering is the pipeline's job.
    async fn all(&self) -> Result<BTreeMap<String, RawPreference>>;
}

/// Resolves source identifiers to metadata and per-source preferences.
#[async_trait]
pub trait SourceRegistry {
    /// Metadata for a source id, or a stub when the source is unknown.
    async fn get_or_stub(&self, source_id: i64) -> Result<SourceInfo>;

    /// Raw preference stores of every configurable source.
    async fn source_preferences(&self) -> Result<Vec<SourcePreferences>>;
}
