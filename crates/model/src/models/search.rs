use serde::{Deserialize, Serialize};

/// A saved search definition for a single source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupSavedSearch {
    pub name: String,
    pub query: String,
    /// Opaque filter state as the source serialized it; restored verbatim.
    pub filters: String,
    pub source: i64,
}
