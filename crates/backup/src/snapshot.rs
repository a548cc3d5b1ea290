//! Entity-to-record mapping.
//!
//! Converts domain entities into their transport records. The base fields
//! of an entry are always carried; each optional collection is populated
//! only when its flag is set *and* the store actually has rows for it.
//!
//! History is the one join in the pipeline: rows reference chapters by id
//! and the record needs the chapter's URL. A history row whose chapter no
//! longer exists fails the entire export — snapshots are all-or-nothing,
//! a partial container is never returned.

use crate::error::{ErrorKind, Result};
use kura_config::BackupFlags;
use kura_library::{Category, Chapter, LibraryEntry, SavedSearch, SourceInfo, Track};
use kura_library::LibraryStore;
use kura_model::{
    BackupCategory, BackupChapter, BackupEntry, BackupHistory, BackupSavedSearch, BackupSource, BackupTrack,
};

/// Snapshot a single library entry, populating optional collections per the
/// flag set.
pub async fn snapshot_entry(
    store: &dyn LibraryStore,
    entry: &LibraryEntry,
    flags: &BackupFlags,
) -> Result<BackupEntry> {
    let mut record = base_record(entry);

    if flags.chapters {
        let chapters = store.chapters_of(entry.id).await.map_err(ErrorKind::store)?;
        if !chapters.is_empty() {
            record.chapters = chapters.iter().map(chapter_record).collect();
        }
    }

    if flags.categories {
        let categories = store.categories_of(entry.id).await.map_err(ErrorKind::store)?;
        let orders: Vec<i64> = categories.iter().filter(|c| !c.is_system()).map(|c| c.order).collect();
        if !orders.is_empty() {
            record.categories = orders;
        }
    }

    if flags.tracking {
        let tracks = store.tracks_of(entry.id).await.map_err(ErrorKind::store)?;
        if !tracks.is_empty() {
            record.tracking = tracks.iter().map(track_record).collect();
        }
    }

    if flags.history {
        let rows = store.history_of(entry.id).await.map_err(ErrorKind::store)?;
        if !rows.is_empty() {
            let mut history = Vec::with_capacity(rows.len());
            for row in &rows {
                let chapter = store.chapter_by_id(row.chapter_id).await.map_err(ErrorKind::store)?;
                history.push(BackupHistory {
                    url: chapter.url,
                    last_read: row.last_read,
                    read_duration: row.read_duration,
                });
            }
            record.history = history;
        }
    }

    Ok(record)
}

fn base_record(entry: &LibraryEntry) -> BackupEntry {
    BackupEntry {
        source: entry.source,
        url: entry.url.clone(),
        title: entry.title.clone(),
        author: entry.author.clone(),
        artist: entry.artist.clone(),
        description: entry.description.clone(),
        thumbnail_url: entry.thumbnail_url.clone(),
        status: entry.status,
        favorite: entry.favorite,
        ..BackupEntry::default()
    }
}

pub(crate) fn chapter_record(chapter: &Chapter) -> BackupChapter {
    BackupChapter {
        url: chapter.url.clone(),
        name: chapter.name.clone(),
        chapter_number: chapter.chapter_number,
        read: chapter.read,
        bookmark: chapter.bookmark,
        last_page_read: chapter.last_page_read,
        scanlator: chapter.scanlator.clone(),
        source_order: chapter.source_order,
    }
}

pub(crate) fn track_record(track: &Track) -> BackupTrack {
    BackupTrack {
        sync_id: track.sync_id,
        remote_id: track.remote_id,
        remote_url: track.remote_url.clone(),
        title: track.title.clone(),
        last_chapter_read: track.last_chapter_read,
        total_chapters: track.total_chapters,
        score: track.score,
        status: track.status,
    }
}

pub(crate) fn category_record(category: &Category) -> BackupCategory {
    BackupCategory { name: category.name.clone(), order: category.order }
}

pub(crate) fn search_record(search: &SavedSearch) -> BackupSavedSearch {
    BackupSavedSearch {
        name: search.name.clone(),
        query: search.query.clone(),
        filters: search.filters.clone(),
        source: search.source,
    }
}

pub(crate) fn source_record(source: &SourceInfo) -> BackupSource {
    BackupSource { name: source.name.clone(), source_id: source.id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kura_library::History;
    use kura_library::mock::MemoryStore;

    fn entry(id: i64) -> LibraryEntry {
        LibraryEntry {
            id,
            source: 7,
            url: format!("/series/{id}"),
            title: format!("Series {id}"),
            author: Some("Author".to_string()),
            artist: None,
            description: None,
            thumbnail_url: None,
            status: 1,
            favorite: true,
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
            read: id % 2 == 0,
            bookmark: false,
            last_page_read: 0,
            scanlator: None,
            source_order: id,
        }
    }

    fn category(id: i64, order: i64, system: bool) -> Category {
        Category { id, name: format!("Category {id}"), order, system }
    }

    fn populated_store() -> MemoryStore {
        MemoryStore::default()
            .with_chapter(chapter(1, 10))
            .with_chapter(chapter(2, 10))
            .with_chapter(chapter(3, 10))
            .with_category(category(0, 0, true))
            .with_category(category(1, 1, false))
            .with_category(category(2, 2, false))
            .with_membership(10, 0)
            .with_membership(10, 1)
            .with_membership(10, 2)
            .with_track(Track {
                entry_id: 10,
                sync_id: 1,
                remote_id: 55,
                remote_url: "https://tracker.invalid/55".to_string(),
                title: "Series 10".to_string(),
                last_chapter_read: 2.0,
                total_chapters: 0,
                score: 8.0,
                status: 1,
            })
            .with_history(10, History { chapter_id: 2, last_read: 1_700_000_000_000, read_duration: 60_000 })
    }

    #[tokio::test]
    async fn test_worked_example_categories_and_chapters() {
        // flags = {categories, chapters}: 2 non-system categories and 3
        // chapters come through; tracking and history stay empty.
        let store = populated_store();
        let flags = BackupFlags { categories: true, chapters: true, ..BackupFlags::none() };
        let record = snapshot_entry(&store, &entry(10), &flags).await.unwrap();
        assert_eq!(record.categories.len(), 2);
        assert_eq!(record.chapters.len(), 3);
        assert!(record.tracking.is_empty());
        assert!(record.history.is_empty());
    }

    #[tokio::test]
    async fn test_system_categories_never_exported() {
        let store = populated_store();
        let flags = BackupFlags { categories: true, ..BackupFlags::none() };
        let record = snapshot_entry(&store, &entry(10), &flags).await.unwrap();
        // Orders 1 and 2; the system category's order 0 is absent.
        assert_eq!(record.categories, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_unset_flags_leave_collections_empty() {
        let store = populated_store();
        let record = snapshot_entry(&store, &entry(10), &BackupFlags::none()).await.unwrap();
        assert!(record.chapters.is_empty());
        assert!(record.categories.is_empty());
        assert!(record.tracking.is_empty());
        assert!(record.history.is_empty());
        // Base fields always come through
        assert_eq!(record.title, "Series 10");
        assert_eq!(record.source, 7);
    }

    #[tokio::test]
    async fn test_history_joins_chapter_url() {
        let store = populated_store();
        let flags = BackupFlags { history: true, ..BackupFlags::none() };
        let record = snapshot_entry(&store, &entry(10), &flags).await.unwrap();
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].url, "/chapter/2");
        assert_eq!(record.history[0].read_duration, 60_000);
    }

    #[tokio::test]
    async fn test_dangling_history_reference_fails() {
        // History row points at chapter 99 which doesn't exist; the whole
        // snapshot fails rather than silently skipping the row.
        let store = MemoryStore::default()
            .with_chapter(chapter(1, 10))
            .with_history(10, History { chapter_id: 99, last_read: 0, read_duration: 0 });
        let flags = BackupFlags { history: true, ..BackupFlags::none() };
        let err = snapshot_entry(&store, &entry(10), &flags).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Lookup));
    }

    #[tokio::test]
    async fn test_entry_with_no_rows_stays_empty_even_with_flags() {
        let store = MemoryStore::default();
        let record = snapshot_entry(&store, &entry(10), &BackupFlags::all()).await.unwrap();
        assert!(record.chapters.is_empty());
        assert!(record.tracking.is_empty());
        assert!(record.history.is_empty());
    }
}
