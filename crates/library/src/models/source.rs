use crate::models::RawPreference;
use std::collections::BTreeMap;

/// Metadata about a content source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    pub id: i64,
    pub name: String,
}

impl SourceInfo {
    /// Placeholder for a source the registry no longer knows about.
    ///
    /// Entries from uninstalled sources still get exported; the stub keeps
    /// the id so a restore can point the user at what's missing.
    pub fn stub(id: i64) -> Self {
        Self { id, name: format!("Unknown source ({id})") }
    }
}

/// The raw preference values of one configurable source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePreferences {
    /// The source's preference-store key.
    pub source_key: String,
    pub values: BTreeMap<String, RawPreference>,
}
