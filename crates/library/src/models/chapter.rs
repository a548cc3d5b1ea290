/// A chapter row as the data store sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub id: i64,
    pub entry_id: i64,
    /// Source-relative URL; the stable key history joins resolve to.
    pub url: String,
    pub name: String,
    pub chapter_number: f32,
    pub read: bool,
    pub bookmark: bool,
    pub last_page_read: i64,
    pub scanlator: Option<String>,
    /// Position within the source's chapter list.
    pub source_order: i64,
}
