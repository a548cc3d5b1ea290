use serde::{Deserialize, Serialize};

/// Stub metadata about a source referenced by exported entries.
///
/// Only enough to identify the source on restore; capabilities and
/// preferences are carried separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupSource {
    pub name: String,
    pub source_id: i64,
}
