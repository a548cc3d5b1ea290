//! Backup artifact naming.
//!
//! Scheduled backups are named `kura_YYYY-MM-DD_HH-MM-SS.kbk.gz`. The
//! timestamp is zero-padded UTC, which makes plain lexicographic ordering of
//! filenames identical to chronological ordering — retention pruning sorts
//! names descending and keeps the head of the list, so this property is
//! load-bearing, not cosmetic.

use regex::Regex;
use std::sync::LazyLock;
use time::OffsetDateTime;
use time::macros::format_description;

/// Extension of a backup artifact: the container format, then the
/// compression layer.
pub const BACKUP_EXTENSION: &str = ".kbk.gz";

static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^kura_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.kbk\.gz$").expect("hardcoded pattern compiles")
});

/// Generate a backup filename for the given instant.
///
/// # Examples
///
/// ```
/// use time::macros::datetime;
/// use kura_model::filename;
///
/// let name = filename::generate(datetime!(2026-08-28 09:30:05 UTC));
/// assert_eq!(name, "kura_2026-08-28_09-30-05.kbk.gz");
/// ```
pub fn generate(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let stamp = at
        .to_offset(time::UtcOffset::UTC)
        .format(&format)
        // The description has no offset/locale components, so formatting an
        // OffsetDateTime with it cannot fail.
        .unwrap_or_default();
    format!("kura_{stamp}{BACKUP_EXTENSION}")
}

/// Whether a filename matches the scheduled-backup naming scheme.
///
/// Retention pruning only ever deletes files matching this pattern, so a
/// user dropping unrelated files into the backup directory never loses them.
pub fn matches(name: &str) -> bool {
    FILENAME_PATTERN.is_match(name)
}
