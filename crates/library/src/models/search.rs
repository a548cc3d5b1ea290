/// A saved search definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSearch {
    pub source: i64,
    pub name: String,
    pub query: String,
    /// Opaque filter state as the source serialized it.
    pub filters: String,
}
