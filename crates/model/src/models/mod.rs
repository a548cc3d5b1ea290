mod backup;
mod category;
mod chapter;
mod entry;
mod history;
mod preference;
mod search;
mod source;
mod track;

pub use self::backup::Backup;
pub use self::category::BackupCategory;
pub use self::chapter::BackupChapter;
pub use self::entry::BackupEntry;
pub use self::history::BackupHistory;
pub use self::preference::{BackupPreference, BackupSourcePreferences, PreferenceValue};
pub use self::search::BackupSavedSearch;
pub use self::source::BackupSource;
pub use self::track::BackupTrack;
