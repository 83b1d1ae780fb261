//! Structural validation of a candidate rule list.
//!
//! The document must be a JSON array.  Then, in order, for every entry:
//! - the entry is a JSON object
//! - `from` is a non-empty string
//! - `to` is a non-empty string
//! - `from` compiles as a regular expression
//!
//! The first failing rule stops validation.  Entry-level errors carry the
//! entry's zero-based index and the entry itself rendered as JSON, so the
//! operator can find it in a long file.

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::rule::{RedirectRule, RedirectSet};

/// Error type for rule-list validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("redirects must be an array of redirect objects, found {found}")]
    NotAnArray { found: &'static str },

    #[error("redirect #{index} is not an object: {context}")]
    NotAnObject { index: usize, context: String },

    #[error("redirect #{index} has no \"from\" pattern: {context}")]
    MissingFrom { index: usize, context: String },

    #[error("redirect #{index} has no \"to\" target: {context}")]
    MissingTo { index: usize, context: String },

    #[error("redirect #{index} has an invalid \"from\" pattern ({reason}): {context}")]
    InvalidPattern {
        index: usize,
        reason: String,
        context: String,
    },
}

impl ValidationError {
    /// Index of the offending entry, or `None` when the whole document is wrong.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::NotAnArray { .. } => None,
            ValidationError::NotAnObject { index, .. }
            | ValidationError::MissingFrom { index, .. }
            | ValidationError::MissingTo { index, .. }
            | ValidationError::InvalidPattern { index, .. } => Some(*index),
        }
    }
}

/// Checks that `candidate` is an array of usable rules.
///
/// An empty array is valid.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the document, or for the first entry
/// that fails.
pub fn validate_redirects(candidate: &RedirectSet) -> Result<(), ValidationError> {
    let entries = match candidate.as_value() {
        Value::Array(entries) => entries,
        other => {
            return Err(ValidationError::NotAnArray {
                found: json_type(other),
            })
        }
    };

    for (index, entry) in entries.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            return Err(ValidationError::NotAnObject {
                index,
                context: entry.to_string(),
            });
        };
        validate_rule(index, &<RedirectRule as From<serde_json::Map<String, Value>>>::from(object.clone()))?;
    }
    debug!(rules = entries.len(), "redirects passed validation");
    Ok(())
}

fn validate_rule(index: usize, rule: &RedirectRule) -> Result<(), ValidationError> {
    let from = match rule.from() {
        Some(from) if !from.is_empty() => from,
        _ => {
            return Err(ValidationError::MissingFrom {
                index,
                context: context_of(rule),
            })
        }
    };

    if rule.to().map_or(true, str::is_empty) {
        return Err(ValidationError::MissingTo {
            index,
            context: context_of(rule),
        });
    }

    Regex::new(from).map_err(|e| ValidationError::InvalidPattern {
        index,
        reason: e.to_string(),
        context: context_of(rule),
    })?;

    Ok(())
}

fn context_of(rule: &RedirectRule) -> String {
    Value::Object(rule.as_map().clone()).to_string()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(rules: Vec<RedirectRule>) -> RedirectSet {
        RedirectSet::new(rules)
    }

    #[test]
    fn test_empty_set_is_valid() {
        assert_eq!(validate_redirects(&RedirectSet::default()), Ok(()));
    }

    #[test]
    fn test_well_formed_rules_are_valid() {
        let candidate = set(vec![
            RedirectRule::new("^/old-post/$", "/new-post/"),
            RedirectRule::new("^/blog/(.*)$", "/$1").permanent(),
        ]);
        assert_eq!(validate_redirects(&candidate), Ok(()));
    }

    #[test]
    fn test_object_document_is_not_an_array() {
        let candidate = RedirectSet::from_value(json!({}));

        let err = validate_redirects(&candidate).unwrap_err();

        assert_eq!(err, ValidationError::NotAnArray { found: "an object" });
        assert_eq!(err.index(), None);
    }

    #[test]
    fn test_null_entry_is_not_an_object() {
        let candidate = RedirectSet::from_value(json!([{"from": "^/a$", "to": "/b"}, null]));

        let err = validate_redirects(&candidate).unwrap_err();

        assert_eq!(
            err,
            ValidationError::NotAnObject {
                index: 1,
                context: "null".to_string()
            }
        );
    }

    #[test]
    fn test_missing_from_is_rejected_with_index() {
        // Arrange
        let candidate = set(vec![
            RedirectRule::new("^/a$", "/b"),
            RedirectRule::default().with("to", json!("/only-target")),
        ]);

        // Act
        let err = validate_redirects(&candidate).unwrap_err();

        // Assert
        assert!(matches!(err, ValidationError::MissingFrom { index: 1, .. }));
        assert!(err.to_string().contains("/only-target"));
    }

    #[test]
    fn test_numeric_from_is_rejected_as_missing() {
        let candidate = RedirectSet::from_value(json!([{"from": 5, "to": "/b"}]));
        assert!(matches!(
            validate_redirects(&candidate),
            Err(ValidationError::MissingFrom { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_from_is_rejected() {
        let candidate = set(vec![RedirectRule::new("", "/b")]);
        assert!(matches!(
            validate_redirects(&candidate),
            Err(ValidationError::MissingFrom { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_to_is_rejected() {
        let candidate = set(vec![RedirectRule::default().with("from", json!("^/a$"))]);
        assert!(matches!(
            validate_redirects(&candidate),
            Err(ValidationError::MissingTo { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_to_is_rejected() {
        let candidate = set(vec![RedirectRule::new("^/a$", "")]);
        let err = validate_redirects(&candidate).unwrap_err();
        assert_eq!(err.index(), Some(0));
    }

    #[test]
    fn test_non_boolean_permanent_does_not_fail_validation() {
        let candidate = RedirectSet::from_value(
            json!([{"from": "^/a$", "to": "/b", "permanent": "yes"}]),
        );
        assert_eq!(validate_redirects(&candidate), Ok(()));
    }

    #[test]
    fn test_unbalanced_pattern_is_rejected() {
        let candidate = set(vec![RedirectRule::new("^/broken(/$", "/fixed/")]);
        assert!(matches!(
            validate_redirects(&candidate),
            Err(ValidationError::InvalidPattern { index: 0, .. })
        ));
    }

    #[test]
    fn test_first_failure_wins() {
        let candidate = set(vec![
            RedirectRule::new("(", "/x"),
            RedirectRule::new("", "/y"),
        ]);
        assert_eq!(validate_redirects(&candidate).unwrap_err().index(), Some(0));
    }
}
