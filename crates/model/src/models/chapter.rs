use serde::{Deserialize, Serialize};

/// A chapter's read state, snapshotted for backup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupChapter {
    /// Source-relative URL; also the key history records join on.
    pub url: String,
    pub name: String,
    pub chapter_number: f32,
    pub read: bool,
    pub bookmark: bool,
    pub last_page_read: i64,
    pub scanlator: Option<String>,
    /// Position within the source's chapter list at snapshot time.
    pub source_order: i64,
}
