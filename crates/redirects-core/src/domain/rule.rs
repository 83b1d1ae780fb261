//! Redirect rule domain entity.
//!
//! A [`RedirectSet`] is the decoded content of `redirects.json`.  The store
//! does not interpret rules beyond their shape: the document is held as the
//! JSON value it was parsed from, so every key, every value type and the key
//! order survive a round trip.  A download returns what an upload stored.
//!
//! Whether the document is actually an array of rule objects is decided by
//! [`crate::validate_redirects`], not by decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP status used for rules marked `"permanent": true`.
pub const PERMANENT_STATUS: u16 = 301;

/// HTTP status used for every other rule.
pub const TEMPORARY_STATUS: u16 = 302;

pub const FROM_KEY: &str = "from";
pub const TO_KEY: &str = "to";
pub const PERMANENT_KEY: &str = "permanent";

/// A single redirect entry, kept as the JSON object it was read from.
///
/// The accessors only look at the well-known keys; nothing is coerced or
/// dropped.  `"permanent": "yes"` is stored as a string and simply does not
/// count as permanent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectRule(Map<String, Value>);

impl RedirectRule {
    /// Creates a temporary redirect from `from` to `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::default()
            .with(FROM_KEY, Value::String(from.into()))
            .with(TO_KEY, Value::String(to.into()))
    }

    /// Marks the rule as permanent.
    pub fn permanent(self) -> Self {
        self.with(PERMANENT_KEY, Value::Bool(true))
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// The `from` pattern, if present and a string.
    pub fn from(&self) -> Option<&str> {
        self.0.get(FROM_KEY).and_then(Value::as_str)
    }

    /// The `to` target, if present and a string.
    pub fn to(&self) -> Option<&str> {
        self.0.get(TO_KEY).and_then(Value::as_str)
    }

    /// `true` only for a literal JSON `true`.
    pub fn is_permanent(&self) -> bool {
        matches!(self.0.get(PERMANENT_KEY), Some(Value::Bool(true)))
    }

    /// Returns the HTTP status a consumer should answer with for this rule.
    pub fn status_code(&self) -> u16 {
        if self.is_permanent() {
            PERMANENT_STATUS
        } else {
            TEMPORARY_STATUS
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RedirectRule {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Decoded redirects document.
///
/// Normally an array of rule objects; the empty array means "no redirects".
/// Any other JSON value is carried as-is so that it can be reported by the
/// validator or returned unchanged by a download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectSet(Value);

impl Default for RedirectSet {
    fn default() -> Self {
        Self(Value::Array(Vec::new()))
    }
}

impl RedirectSet {
    pub fn new(rules: Vec<RedirectRule>) -> Self {
        rules.into_iter().collect()
    }

    /// Wraps an arbitrary decoded JSON document.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The array entries, or an empty slice if the document is not an array.
    pub fn entries(&self) -> &[Value] {
        self.0.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of array entries.  Non-array documents count as zero.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The entries that are JSON objects, in order.
    pub fn rules(&self) -> impl Iterator<Item = RedirectRule> + '_ {
        self.entries()
            .iter()
            .filter_map(Value::as_object)
            .map(|map| <RedirectRule as From<Map<String, Value>>>::from(map.clone()))
    }

    /// Number of rules marked permanent.
    pub fn permanent_count(&self) -> usize {
        self.rules().filter(RedirectRule::is_permanent).count()
    }
}

impl From<Vec<RedirectRule>> for RedirectSet {
    fn from(rules: Vec<RedirectRule>) -> Self {
        Self::new(rules)
    }
}

impl From<Value> for RedirectSet {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl FromIterator<RedirectRule> for RedirectSet {
    fn from_iter<I: IntoIterator<Item = RedirectRule>>(iter: I) -> Self {
        Self(Value::Array(
            iter.into_iter()
                .map(|rule| Value::Object(rule.into_map()))
                .collect(),
        ))
    }
}
