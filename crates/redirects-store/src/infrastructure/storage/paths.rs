//! Location of the redirects files inside the content data directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use redirects_core::{backup_file_name, CURRENT_FILE_NAME};
use uuid::Uuid;

/// The single named resource every operation works on.
///
/// Built once from configuration and passed into each operation; nothing
/// caches a handle to the current file between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectsPaths {
    content_dir: PathBuf,
}

impl RedirectsPaths {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// `<content-dir>/redirects.json`
    pub fn current(&self) -> PathBuf {
        self.content_dir.join(CURRENT_FILE_NAME)
    }

    /// `<content-dir>/redirects-<YYYY-MM-DD-HH-mm-ss>.json` for a rotation at `at`.
    pub fn backup_at(&self, at: &DateTime<FixedOffset>) -> PathBuf {
        self.content_dir.join(backup_file_name(at))
    }

    /// A fresh staging file name next to the current file.
    ///
    /// Staging in the same directory keeps the final rename on one file system.
    pub fn staging(&self) -> PathBuf {
        self.content_dir
            .join(format!(".{CURRENT_FILE_NAME}.{}.tmp", Uuid::new_v4()))
    }
}
