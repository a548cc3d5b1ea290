use super::{BackupChapter, BackupHistory, BackupTrack};
use serde::{Deserialize, Serialize};

/// A library entry as it appears inside a backup.
///
/// Base fields are always populated; the four collections are filled only
/// when the corresponding export flag was set *and* the entry actually has
/// the data (an entry with no tracking records contributes an empty list
/// even when tracking export is on).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// Identifier of the source this entry belongs to.
    pub source: i64,
    /// Source-relative URL; together with `source` this identifies the
    /// entry on restore.
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Publication status code as reported by the source.
    pub status: i32,
    pub favorite: bool,
    pub chapters: Vec<BackupChapter>,
    /// Order values of the (non-system) categories this entry belongs to.
    pub categories: Vec<i64>,
    pub tracking: Vec<BackupTrack>,
    pub history: Vec<BackupHistory>,
}
