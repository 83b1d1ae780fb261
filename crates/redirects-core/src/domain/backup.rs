//! Naming of the current configuration file and its backups.
//!
//! ```text
//! <content-data-dir>/redirects.json                      current
//! <content-data-dir>/redirects-2024-03-09-14-05-59.json  backup
//! ```
//!
//! Backups use second granularity, so two uploads inside the same second map
//! to the same backup name.  The rotator replaces the older backup in that case.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// File name of the current configuration inside the content data directory.
pub const CURRENT_FILE_NAME: &str = "redirects.json";

/// `chrono` format string producing `YYYY-MM-DD-HH-mm-ss`.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

const BACKUP_PREFIX: &str = "redirects-";
const BACKUP_SUFFIX: &str = ".json";

/// Returns the backup file name for a rotation performed at `at`.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use redirects_core::backup_file_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
/// assert_eq!(backup_file_name(&at), "redirects-2024-03-09-14-05-59.json");
/// ```
pub fn backup_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{BACKUP_PREFIX}{}{BACKUP_SUFFIX}",
        at.format(BACKUP_TIMESTAMP_FORMAT)
    )
}
