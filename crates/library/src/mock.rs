//! In-memory collaborator implementations for testing.
//!
//! All of these are immutable after construction — the pipeline only ever
//! reads — so no interior locking is needed.

use crate::error::{ErrorKind, Result};
use crate::models::{
    Category, Chapter, History, LibraryEntry, RawPreference, SavedSearch, SourceInfo, SourcePreferences, Track,
};
use crate::store::{LibraryStore, PreferenceStore, SourceRegistry};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// In-memory [`LibraryStore`] built up with `with_*` calls.
///
/// # Examples
///
/// ```
/// use kura_library::mock::MemoryStore;
/// use kura_library::LibraryEntry;
///
/// let store = MemoryStore::default().with_favorite(LibraryEntry {
///     id: 1,
///     source: 7,
///     url: "/series/example".to_string(),
///     title: "Example".to_string(),
///     author: None,
///     artist: None,
///     description: None,
///     thumbnail_url: None,
///     status: 0,
///     favorite: true,
///     local: false,
/// });
/// ```
#[derive(Default)]
pub struct MemoryStore {
    favorites: Vec<LibraryEntry>,
    read_non_library: Vec<LibraryEntry>,
    categories: Vec<Category>,
    /// entry id → ids of the categories it belongs to
    memberships: HashMap<i64, Vec<i64>>,
    chapters: Vec<Chapter>,
    tracks: Vec<Track>,
    /// entry id → history rows
    histories: HashMap<i64, Vec<History>>,
    saved_searches: Vec<SavedSearch>,
}

impl MemoryStore {
    pub fn with_favorite(mut self, entry: LibraryEntry) -> Self {
        self.favorites.push(entry);
        self
    }

    pub fn with_read_non_library(mut self, entry: LibraryEntry) -> Self {
        self.read_non_library.push(entry);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Put an entry into a category (both referenced by id).
    pub fn with_membership(mut self, entry_id: i64, category_id: i64) -> Self {
        self.memberships.entry(entry_id).or_default().push(category_id);
        self
    }

    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn with_history(mut self, entry_id: i64, history: History) -> Self {
        self.histories.entry(entry_id).or_default().push(history);
        self
    }

    pub fn with_saved_search(mut self, search: SavedSearch) -> Self {
        self.saved_searches.push(search);
        self
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn favorites(&self) -> Result<Vec<LibraryEntry>> {
        Ok(self.favorites.clone())
    }

    async fn read_non_library(&self) -> Result<Vec<LibraryEntry>> {
        Ok(self.read_non_library.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn categories_of(&self, entry_id: i64) -> Result<Vec<Category>> {
        let ids = self.memberships.get(&entry_id).cloned().unwrap_or_default();
        Ok(self.categories.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }

    async fn chapters_of(&self, entry_id: i64) -> Result<Vec<Chapter>> {
        Ok(self.chapters.iter().filter(|c| c.entry_id == entry_id).cloned().collect())
    }

    async fn chapter_by_id(&self, chapter_id: i64) -> Result<Chapter> {
        match self.chapters.iter().find(|c| c.id == chapter_id) {
            Some(chapter) => Ok(chapter.clone()),
            None => exn::bail!(ErrorKind::ChapterNotFound(chapter_id)),
        }
    }

    async fn tracks_of(&self, entry_id: i64) -> Result<Vec<Track>> {
        Ok(self.tracks.iter().filter(|t| t.entry_id == entry_id).cloned().collect())
    }

    async fn history_of(&self, entry_id: i64) -> Result<Vec<History>> {
        Ok(self.histories.get(&entry_id).cloned().unwrap_or_default())
    }

    async fn saved_searches(&self) -> Result<Vec<SavedSearch>> {
        Ok(self.saved_searches.clone())
    }
}

/// In-memory [`PreferenceStore`].
#[derive(Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, RawPreference>,
}

impl MemoryPreferences {
    pub fn with(mut self, key: impl Into<String>, value: RawPreference) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn all(&self) -> Result<BTreeMap<String, RawPreference>> {
        Ok(self.values.clone())
    }
}

/// In-memory [`SourceRegistry`] with a fixed set of known sources.
#[derive(Default)]
pub struct StaticRegistry {
    sources: HashMap<i64, String>,
    preferences: Vec<SourcePreferences>,
}

impl StaticRegistry {
    pub fn with_source(mut self, id: i64, name: impl Into<String>) -> Self {
        self.sources.insert(id, name.into());
        self
    }

    pub fn with_source_preferences(mut self, prefs: SourcePreferences) -> Self {
        self.preferences.push(prefs);
        self
    }
}

#[async_trait]
impl SourceRegistry for StaticRegistry {
    async fn get_or_stub(&self, source_id: i64) -> Result<SourceInfo> {
        Ok(match self.sources.get(&source_id) {
            Some(name) => SourceInfo { id: source_id, name: name.clone() },
            None => SourceInfo::stub(source_id),
        })
    }

    async fn source_preferences(&self) -> Result<Vec<SourcePreferences>> {
        Ok(self.preferences.clone())
    }
}
