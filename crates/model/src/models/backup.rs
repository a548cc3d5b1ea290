use super::{
    BackupCategory, BackupEntry, BackupPreference, BackupSavedSearch, BackupSource, BackupSourcePreferences,
};
use serde::{Deserialize, Serialize};

/// The top-level backup container.
///
/// Every field is an independently-toggled export category; whichever
/// categories the caller left unselected are present as empty collections so
/// the on-disk shape never varies with the flag set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub entries: Vec<BackupEntry>,
    pub categories: Vec<BackupCategory>,
    /// Stub metadata for every source referenced by an exported entry, so a
    /// restore can tell the user which sources it needs before any entry is
    /// recreated.
    pub sources: Vec<BackupSource>,
    pub preferences: Vec<BackupPreference>,
    pub source_preferences: Vec<BackupSourcePreferences>,
    pub saved_searches: Vec<BackupSavedSearch>,
}

impl Backup {
    /// Whether the container carries anything worth restoring.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
            && self.categories.is_empty()
            && self.preferences.is_empty()
            && self.source_preferences.is_empty()
            && self.saved_searches.is_empty()
    }
}
