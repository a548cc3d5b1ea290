use serde::{Deserialize, Serialize};

/// A single chapter's reading history.
///
/// References the chapter by URL rather than database id, since ids don't
/// survive a restore onto a fresh database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupHistory {
    pub url: String,
    /// Last read timestamp, milliseconds since the Unix epoch. Zero when
    /// the chapter was never opened.
    pub last_read: i64,
    /// Cumulative reading time in milliseconds.
    pub read_duration: i64,
}
