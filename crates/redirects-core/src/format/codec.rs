//! JSON codec for the redirects file.
//!
//! File format:
//! ```text
//! [
//!   {"from": "^/old/$", "to": "/new/", "permanent": true},
//!   {"from": "^/blog/(.*)$", "to": "/$1"}
//! ]
//! ```
//! UTF-8 text holding a single JSON array of rule objects.  There is no schema
//! version field.
//!
//! Decoding only checks that the text is JSON.  Any JSON value decodes; the
//! array-of-objects shape is checked by [`crate::validate_redirects`].

use thiserror::Error;

use crate::domain::rule::RedirectSet;

/// Errors that can occur while decoding or encoding a redirects file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The bytes are not UTF-8 text.
    #[error("redirects file is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    /// The text is not JSON (or is truncated).
    #[error("could not parse redirects JSON: {0}")]
    Syntax(String),

    /// The rule list could not be rendered as JSON.
    #[error("failed to serialize redirects: {0}")]
    Serialize(String),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes the raw contents of a redirects file.
///
/// # Errors
///
/// Returns [`FormatError::InvalidUtf8`] or [`FormatError::Syntax`] with the
/// parser's diagnostic.
///
/// # Examples
///
/// ```rust
/// use redirects_core::{decode_redirects, FormatError};
///
/// let set = decode_redirects(br#"[{"from": "^/a$", "to": "/b"}]"#).unwrap();
/// assert_eq!(set.len(), 1);
///
/// assert!(matches!(decode_redirects(b"[{"), Err(FormatError::Syntax(_))));
/// ```
pub fn decode_redirects(bytes: &[u8]) -> Result<RedirectSet, FormatError> {
    let text = std::str::from_utf8(bytes).map_err(|e| FormatError::InvalidUtf8(e.to_string()))?;

    serde_json::from_str(text)
        .map(RedirectSet::from_value)
        .map_err(|e| FormatError::Syntax(e.to_string()))
}

/// Encodes a rule list as compact JSON text.
///
/// # Errors
///
/// Returns [`FormatError::Serialize`] if serialization fails.
pub fn encode_redirects(set: &RedirectSet) -> Result<String, FormatError> {
    serde_json::to_string(set).map_err(|e| FormatError::Serialize(e.to_string()))
}
