/// A library category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// User-chosen ordering; the value entries reference in backups.
    pub order: i64,
    /// System categories (the implicit default bucket) are created by the
    /// application, cannot be renamed, and are never exported.
    pub system: bool,
}

impl Category {
    pub fn is_system(&self) -> bool {
        self.system
    }
}
