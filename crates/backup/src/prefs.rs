//! Preference filtering.
//!
//! Maps a raw key-value store snapshot into the closed set of preference
//! kinds the transport schema supports. Two things fall out on the way:
//! keys the exclusion predicate marks as internal, and values of kinds a
//! backup cannot represent. Both are dropped silently — an unsupported kind
//! is expected data, not an error.

use kura_library::RawPreference;
use kura_model::{BackupPreference, PreferenceValue};
use std::collections::BTreeMap;

/// Keys holding credentials or other secrets.
pub const PRIVATE_PREFIX: &str = "__PRIVATE_";
/// Keys holding transient application state (cursors, one-shot flags).
pub const APP_STATE_PREFIX: &str = "__APP_STATE_";

/// The default exclusion predicate: private and app-state keys stay out of
/// backups.
pub fn is_internal(key: &str) -> bool {
    key.starts_with(PRIVATE_PREFIX) || key.starts_with(APP_STATE_PREFIX)
}

/// Filter a raw preference snapshot down to exportable entries.
///
/// Pure: no side effects, no failure modes. Output order follows the input
/// map's iteration order.
pub fn filter_preferences(
    values: &BTreeMap<String, RawPreference>,
    exclude: impl Fn(&str) -> bool,
) -> Vec<BackupPreference> {
    values
        .iter()
        .filter(|(key, _)| !exclude(key))
        .filter_map(|(key, value)| classify(value).map(|value| BackupPreference::new(key, value)))
        .collect()
}

/// Classify a raw value into a transport kind, or `None` when the kind has
/// no representation in the schema.
fn classify(value: &RawPreference) -> Option<PreferenceValue> {
    match value {
        RawPreference::Int(v) => Some(PreferenceValue::Int(*v)),
        RawPreference::Long(v) => Some(PreferenceValue::Long(*v)),
        RawPreference::Float(v) => Some(PreferenceValue::Float(*v)),
        RawPreference::Str(v) => Some(PreferenceValue::Str(v.clone())),
        RawPreference::Bool(v) => Some(PreferenceValue::Bool(*v)),
        RawPreference::StringSet(v) => Some(PreferenceValue::StringSet(v.clone())),
        RawPreference::Blob(_) => None,
    }
}
