//! Storage infrastructure: redirects file persistence and configuration.
//!
//! This module is the thin adapter between the application and the file
//! system:
//!
//! - `paths`  – where `redirects.json`, its backups, and staging files live.
//! - `reader` – reads and decodes a redirects file; absence means "empty".
//! - `backup` – moves the current file into its timestamped backup slot.
//! - `writer` – replaces the current file atomically (stage, then rename).
//! - `config` – the TOML configuration file for the store itself.

pub mod backup;
pub mod config;
pub mod paths;
pub mod reader;
pub mod writer;

pub use backup::rotate_backup;
pub use paths::RedirectsPaths;
pub use reader::read_redirects;
pub use writer::write_redirects;
