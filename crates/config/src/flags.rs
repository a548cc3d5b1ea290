use serde::{Deserialize, Serialize};

/// Which export categories a backup includes.
///
/// One named boolean per category instead of a packed bitmask; each category
/// toggles independently and an unset flag means the corresponding container
/// collection stays empty. Favorites are not a flag — every backup carries
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupFlags {
    /// Also include entries that are not in the library but have read
    /// chapters.
    pub read_entries: bool,
    pub categories: bool,
    pub chapters: bool,
    pub tracking: bool,
    pub history: bool,
    pub app_preferences: bool,
    pub source_preferences: bool,
    pub saved_searches: bool,
}

impl BackupFlags {
    /// Every category enabled.
    pub fn all() -> Self {
        Self {
            read_entries: true,
            categories: true,
            chapters: true,
            tracking: true,
            history: true,
            app_preferences: true,
            source_preferences: true,
            saved_searches: true,
        }
    }

    /// No optional categories; the backup carries favorites only.
    pub fn none() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(BackupFlags::default(), BackupFlags::none());
        assert!(!BackupFlags::none().chapters);
        assert!(BackupFlags::all().chapters);
    }
}
