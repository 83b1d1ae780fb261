//! Atomic writer for the current redirects file.
//!
//! The new content is written to a staging file next to `redirects.json` and
//! then renamed over it.  Readers see either the complete old file, no file
//! (right after a rotation), or the complete new file; never a partial write.

use redirects_core::{encode_redirects, RedirectSet};
use tracing::{debug, warn};

use crate::application::manage_redirects::RedirectsError;
use crate::infrastructure::storage::paths::RedirectsPaths;

/// Serializes `set` and replaces the current redirects file with it.
///
/// Creates the content directory if it does not exist yet.
///
/// # Errors
///
/// Returns [`RedirectsError::BadRequest`] if the set cannot be serialized and
/// [`RedirectsError::Io`] for file-system failures.  A staging file left by a
/// failed rename is removed before returning.
pub async fn write_redirects(
    paths: &RedirectsPaths,
    set: &RedirectSet,
) -> Result<(), RedirectsError> {
    let content = encode_redirects(set)?;

    let dir = paths.content_dir();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| RedirectsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let staging = paths.staging();
    tokio::fs::write(&staging, content.as_bytes())
        .await
        .map_err(|source| RedirectsError::Io {
            path: staging.clone(),
            source,
        })?;

    let current = paths.current();
    if let Err(source) = tokio::fs::rename(&staging, &current).await {
        if let Err(e) = tokio::fs::remove_file(&staging).await {
            warn!(path = %staging.display(), "could not remove staging file: {e}");
        }
        return Err(RedirectsError::Io {
            path: current,
            source,
        });
    }

    debug!(path = %current.display(), bytes = content.len(), "wrote redirects file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use redirects_core::RedirectRule;

    #[tokio::test]
    async fn test_write_creates_missing_content_dir() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let paths = RedirectsPaths::new(dir.path().join("content").join("data"));
        let set = RedirectSet::new(vec![RedirectRule::new("^/a$", "/b")]);

        // Act
        write_redirects(&paths, &set).await.expect("write");

        // Assert
        assert_eq!(
            std::fs::read_to_string(paths.current()).unwrap(),
            r#"[{"from":"^/a$","to":"/b"}]"#
        );
    }

    #[tokio::test]
    async fn test_write_replaces_existing_content_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RedirectsPaths::new(dir.path());
        std::fs::write(paths.current(), "x".repeat(4096)).unwrap();

        write_redirects(&paths, &RedirectSet::default()).await.expect("write");

        assert_eq!(std::fs::read_to_string(paths.current()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RedirectsPaths::new(dir.path());

        write_redirects(&paths, &RedirectSet::default()).await.expect("write");

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("redirects.json")]);
    }

    #[tokio::test]
    async fn test_write_over_directory_fails_and_cleans_up() {
        // A directory sitting at the current path makes the rename fail.
        let dir = tempfile::tempdir().unwrap();
        let paths = RedirectsPaths::new(dir.path());
        std::fs::create_dir(paths.current()).unwrap();
        std::fs::write(paths.current().join("keep"), "x").unwrap();

        let err = write_redirects(&paths, &RedirectSet::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RedirectsError::Io { .. }), "got: {err:?}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
