use serde::{Deserialize, Serialize};

/// The closed set of preference value kinds a backup can carry.
///
/// This is deliberately narrower than what a preference store can hold at
/// runtime; values of any other kind are dropped at snapshot time rather
/// than encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PreferenceValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Str(String),
    Bool(bool),
    StringSet(Vec<String>),
}

/// A single exported preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPreference {
    pub key: String,
    pub value: PreferenceValue,
}

impl BackupPreference {
    pub fn new(key: impl Into<String>, value: PreferenceValue) -> Self {
        Self { key: key.into(), value }
    }
}

/// The filtered preferences of one configurable source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupSourcePreferences {
    /// The source's preference-store key (not its numeric id; sources
    /// share stores across versions via this key).
    pub source_key: String,
    pub preferences: Vec<BackupPreference>,
}
