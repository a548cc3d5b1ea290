/// A library item as the data store sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub id: i64,
    /// Identifier of the source this entry was added from.
    pub source: i64,
    /// Source-relative URL.
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Publication status code as reported by the source.
    pub status: i32,
    /// Whether the entry is in the user's library. Exports always include
    /// favorites; non-favorites only ride along via the read-entries flag.
    pub favorite: bool,
    /// Whether the entry lives in a device-local source rather than an
    /// online one.
    pub local: bool,
}
