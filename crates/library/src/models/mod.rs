mod category;
mod chapter;
mod entry;
mod history;
mod preference;
mod search;
mod source;
mod track;

pub use self::category::Category;
pub use self::chapter::Chapter;
pub use self::entry::LibraryEntry;
pub use self::history::History;
pub use self::preference::RawPreference;
pub use self::search::SavedSearch;
pub use self::source::{SourceInfo, SourcePreferences};
pub use self::track::Track;
