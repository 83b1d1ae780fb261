//! Content reader: loads and decodes a redirects file.

use std::io::ErrorKind;
use std::path::Path;

use redirects_core::{decode_redirects, RedirectSet};
use tracing::debug;

use crate::application::manage_redirects::RedirectsError;

/// Reads the redirects file at `path`.
///
/// A missing file is the normal "no redirects configured" state and yields an
/// empty [`RedirectSet`].
///
/// # Errors
///
/// - [`RedirectsError::BadRequest`] if the file is not UTF-8 JSON.  Any JSON
///   value is returned; its shape is the validator's concern.
/// - [`RedirectsError::NotFound`] if the file exists but cannot be read.
pub async fn read_redirects(path: &Path) -> Result<RedirectSet, RedirectsError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no redirects file, using empty set");
            return Ok(RedirectSet::default());
        }
        Err(source) => {
            return Err(RedirectsError::NotFound {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let set = decode_redirects(&bytes)?;
    debug!(path = %path.display(), rules = set.len(), "read redirects file");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redirects_core::FormatError;

    #[tokio::test]
    async fn test_missing_file_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = read_redirects(&dir.path().join("redirects.json"))
            .await
            .expect("absence is not an error");
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_valid_file_is_decoded() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.json");
        std::fs::write(&path, r#"[{"from":"^/a$","to":"/b","permanent":true}]"#).unwrap();

        // Act
        let set = read_redirects(&path).await.expect("read");

        // Assert
        assert_eq!(set.len(), 1);
        assert_eq!(set.permanent_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_bad_request_with_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.json");
        std::fs::write(&path, "[{\"from\": ").unwrap();

        let err = read_redirects(&path).await.unwrap_err();

        assert!(matches!(
            err,
            RedirectsError::BadRequest(FormatError::Syntax(_))
        ));
        assert!(err.to_string().contains("EOF"), "got: {err}");
    }

    #[tokio::test]
    async fn test_json_object_is_returned_as_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.json");
        std::fs::write(&path, "{}").unwrap();

        let set = read_redirects(&path).await.expect("parseable JSON");

        assert_eq!(set.as_value(), &serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_directory_in_place_of_file_is_not_found() {
        // Reading a directory fails with something other than NotFound.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.json");
        std::fs::create_dir(&path).unwrap();

        let err = read_redirects(&path).await.unwrap_err();

        assert!(matches!(err, RedirectsError::NotFound { .. }), "got: {err:?}");
    }
}
