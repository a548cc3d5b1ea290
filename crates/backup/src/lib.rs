//! The flag-gated export pipeline.
//!
//! One [`BackupWriter::create`] call walks the whole flow: collect snapshots
//! from the injected collaborators, assemble a
//! [`Backup`](kura_model::Backup) container, encode it, gzip it, land it on
//! a [`StorageBackend`](kura_storage::StorageBackend), and re-open the
//! artifact for structural validation. Scheduled runs additionally prune
//! older artifacts down to the configured retention count before writing.
//!
//! The pipeline is strictly sequential within a call — each store read is
//! its own await point, nothing fans out — and holds no locks; keeping two
//! concurrent exports away from the same destination is the caller's job.

pub mod error;
pub mod prefs;
pub mod retention;
mod snapshot;
pub mod validate;
mod writer;

pub use crate::snapshot::snapshot_entry;
pub use crate::validate::{BackupValidator, StructuralValidator, ValidatorHandle};
pub use crate::writer::{BackupWriter, Trigger};
pub use kura_config::BackupFlags;
