//! Backup rotator: moves the current file into its timestamped backup slot.
//!
//! ```text
//! redirects.json ──rename──► redirects-2024-03-09-14-05-59.json
//! ```
//!
//! Exactly one backup exists per timestamp string.  A second rotation within
//! the same second deletes the earlier backup before the rename, so the slot
//! always holds the file that was current immediately before this upload.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info};

use crate::application::manage_redirects::RedirectsError;
use crate::infrastructure::storage::paths::RedirectsPaths;

/// Rotates the current redirects file into the backup slot for `at`.
///
/// Returns the backup path, or `None` when there was no current file to
/// rotate (first-ever upload).
///
/// # Errors
///
/// Returns [`RedirectsError::Io`] if the existence check, the removal of a
/// colliding backup, or the rename fails.  Nothing is retried.
pub async fn rotate_backup(
    paths: &RedirectsPaths,
    at: &DateTime<FixedOffset>,
) -> Result<Option<PathBuf>, RedirectsError> {
    let current = paths.current();
    if !exists(&current).await? {
        debug!(path = %current.display(), "no current redirects file, nothing to back up");
        return Ok(None);
    }

    let backup = paths.backup_at(at);
    if exists(&backup).await? {
        debug!(path = %backup.display(), "replacing backup from the same second");
        tokio::fs::remove_file(&backup)
            .await
            .map_err(|source| RedirectsError::Io {
                path: backup.clone(),
                source,
            })?;
    }

    tokio::fs::rename(&current, &backup)
        .await
        .map_err(|source| RedirectsError::Io {
            path: current.clone(),
            source,
        })?;

    info!(
        from = %current.display(),
        to = %backup.display(),
        "backed up redirects file"
    );
    Ok(Some(backup))
}

async fn exists(path: &Path) -> Result<bool, RedirectsError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|source| RedirectsError::Io {
            path: path.to_path_buf(),
            source,
        })
}
