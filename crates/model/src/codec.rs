//! The fixed binary encoding for [`Backup`] containers.
//!
//! Wraps `bincode` behind two functions so the rest of the workspace never
//! touches the serializer directly; if the wire format ever changes it
//! changes here. Schema *versioning* is deliberately not handled at this
//! layer — the artifact filename and surrounding tooling own that.

use crate::Backup;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing::instrument;

/// Encode a backup container to its binary form.
#[instrument(skip(backup), fields(entries = backup.entries.len(), size))]
pub fn encode(backup: &Backup) -> Result<Vec<u8>> {
    let bytes = bincode::serialize(backup).or_raise(|| ErrorKind::Encode)?;
    tracing::Span::current().record("size", bytes.len());
    Ok(bytes)
}

/// Decode a backup container from its binary form.
pub fn decode(bytes: &[u8]) -> Result<Backup> {
    bincode::deserialize(bytes).or_raise(|| ErrorKind::Decode)
}
