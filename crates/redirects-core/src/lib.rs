//! # redirects-core
//!
//! Shared library for the redirects store containing the redirect rule model,
//! the structural validation rules, backup file naming, and the JSON codec.
//!
//! It has zero dependencies on the file system, async runtimes, or transport
//! layers.  Everything here can be unit-tested without touching disk.
//!
//! # Architecture overview (for beginners)
//!
//! The redirects store keeps a single JSON file of URL redirect rules
//! (`redirects.json`).  Administrators download it, edit it, and upload a
//! replacement.  Before a replacement lands, the previous file is moved to a
//! timestamped backup and the new content is validated.
//!
//! This crate (`redirects-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business rules: what a redirect rule is, which rule
//!   lists are acceptable, how backup files are named, and the vocabulary used
//!   by permission checks (`Action`, `Requester`).
//!
//! - **`format`** – How a rule list is turned into text and back.  Parse
//!   failures are reported with the parser's own diagnostic so operators can
//!   find the broken line.

pub mod domain;
pub mod format;

// Re-export the most-used types at the crate root so callers can write
// `redirects_core::RedirectSet` instead of `redirects_core::domain::rule::RedirectSet`.
pub use domain::access::{Action, Requester, REDIRECTS_RESOURCE};
pub use domain::backup::{backup_file_name, BACKUP_TIMESTAMP_FORMAT, CURRENT_FILE_NAME};
pub use domain::rule::{RedirectRule, RedirectSet};
pub use domain::validate::{validate_redirects, ValidationError};
pub use format::codec::{decode_redirects, encode_redirects, FormatError};
