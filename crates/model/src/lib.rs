//! Backup transport schema and binary codec.
//!
//! Everything that ends up inside a backup artifact lives here: the
//! [`Backup`] container, the per-category record types it aggregates, the
//! fixed binary encoding ([`codec`]), and the sortable artifact naming
//! scheme ([`filename`]) that retention pruning relies on.
//!
//! Records are write-time snapshots. They carry no identity beyond the
//! encode call that produced them, and every collection defaults to empty —
//! a category that wasn't selected for export is an empty list, never an
//! absent one.

pub mod codec;
pub mod error;
pub mod filename;
mod models;

pub use self::models::{
    Backup, BackupCategory, BackupChapter, BackupEntry, BackupHistory, BackupPreference, BackupSavedSearch,
    BackupSource, BackupSourcePreferences, BackupTrack, PreferenceValue,
};
