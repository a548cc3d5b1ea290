/// A reading-history row.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    /// The chapter this history belongs to. Nothing guarantees the chapter
    /// row still exists; resolving this id can fail and the export
    /// propagates that failure.
    pub chapter_id: i64,
    /// Last read timestamp, milliseconds since the Unix epoch; zero when
    /// unknown.
    pub last_read: i64,
    /// Cumulative reading time in milliseconds.
    pub read_duration: i64,
}
