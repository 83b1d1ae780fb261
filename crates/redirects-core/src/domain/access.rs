//! Vocabulary shared with the permission collaborator.
//!
//! The store never decides who may do what.  It names the resource and the
//! action, hands over the [`Requester`], and acts on the yes/no answer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource name passed to every permission check.
pub const REDIRECTS_RESOURCE: &str = "redirects";

/// An operation a requester may be allowed to perform on the redirects file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Download,
    Upload,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Download => "download",
            Action::Upload => "upload",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of whoever issued a download or upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requester {
    pub id: String,
}

impl Requester {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
