use serde::{Deserialize, Serialize};

/// A user-created library category.
///
/// System categories (e.g. the implicit "default" bucket) are never
/// exported; entries reference categories by their `order` value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupCategory {
    pub name: String,
    pub order: i64,
}
