//! Domain snapshot types and the collaborator interfaces the backup
//! pipeline reads from.
//!
//! Nothing in this crate persists anything: every type is a read-only
//! projection captured at export time, and every trait is a query surface.
//! Production code wires these traits to a real database and source
//! registry; tests use the in-memory implementations behind the `mock`
//! feature.

pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
mod models;
mod store;

pub use crate::models::{
    Category, Chapter, History, LibraryEntry, RawPreference, SavedSearch, SourceInfo, SourcePreferences, Track,
};
pub use crate::store::{LibraryStore, PreferenceStore, SourceRegistry};
use std::sync::Arc;

pub type StoreHandle = Arc<dyn LibraryStore + Send + Sync>;
pub type PreferenceHandle = Arc<dyn PreferenceStore + Send + Sync>;
pub type RegistryHandle = Arc<dyn SourceRegistry + Send + Sync>;
