/// Progress recorded with an external tracking service.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub entry_id: i64,
    /// Identifier of the tracking service.
    pub sync_id: i64,
    /// The entry's identifier on the remote service.
    pub remote_id: i64,
    pub remote_url: String,
    pub title: String,
    pub last_chapter_read: f32,
    pub total_chapters: i64,
    pub score: f32,
    pub status: i64,
}
