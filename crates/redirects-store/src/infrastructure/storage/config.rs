//! TOML-based configuration for the redirects store.
//!
//! Example `redirects-store.toml`:
//!
//! ```toml
//! [storage]
//! content_dir = "/srv/blog/content/data"
//!
//! [logging]
//! level = "debug"
//!
//! [access.roles]
//! administrator = ["download", "upload"]
//! editor = ["download"]
//!
//! [access.requesters]
//! alice = "administrator"
//! bob = "editor"
//! ```
//!
//! # Serde default values
//!
//! Every section and field has a default, so an empty or missing file is a
//! valid configuration: redirects live in `content/data` relative to the
//! working directory, logging is at `info`, and only requesters mapped to the
//! `administrator` role may download or upload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use redirects_core::Action;
use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

/// Where the redirects files live.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding `redirects.json` and its backups.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset: `"error"`, `"warn"`,
    /// `"info"`, `"debug"`, `"trace"`, or a full directive string.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Role-based access table consumed by `RolePermissions`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AccessConfig {
    /// Role name → actions the role grants.
    #[serde(default = "default_roles")]
    pub roles: HashMap<String, Vec<Action>>,
    /// Requester id → role name.
    #[serde(default)]
    pub requesters: HashMap<String, String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

/// Role granted every action by the default access table.
pub const ADMINISTRATOR_ROLE: &str = "administrator";

fn default_content_dir() -> PathBuf {
    PathBuf::from("content").join("data")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_roles() -> HashMap<String, Vec<Action>> {
    HashMap::from([(
        ADMINISTRATOR_ROLE.to_string(),
        vec![Action::Download, Action::Upload],
    )])
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            requesters: HashMap::new(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads [`StoreConfig`] from `path`, returning `StoreConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<StoreConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parses TOML text into a [`StoreConfig`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed or a field has the
/// wrong type (e.g. an unknown action name).
pub fn parse_config(content: &str) -> Result<StoreConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_content_dir_is_content_data() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.storage.content_dir, Path::new("content").join("data"));
    }

    #[test]
    fn test_default_log_level_is_info() {
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_default_access_grants_administrator_everything_and_maps_nobody() {
        let cfg = AccessConfig::default();
        assert_eq!(
            cfg.roles.get(ADMINISTRATOR_ROLE),
            Some(&vec![Action::Download, Action::Upload])
        );
        assert!(cfg.requesters.is_empty());
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg = parse_config("").expect("empty config is valid");
        assert_eq!(cfg, StoreConfig::default());
    }

    #[test]
    fn test_full_toml_is_parsed() {
        // Arrange
        let toml_str = r#"
[storage]
content_dir = "/srv/blog/content/data"

[logging]
level = "debug"

[access.roles]
administrator = ["download", "upload"]
editor = ["download"]

[access.requesters]
alice = "administrator"
bob = "editor"
"#;

        // Act
        let cfg = parse_config(toml_str).expect("parse");

        // Assert
        assert_eq!(cfg.storage.content_dir, PathBuf::from("/srv/blog/content/data"));
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.access.roles.get("editor"), Some(&vec![Action::Download]));
        assert_eq!(cfg.access.requesters.get("bob").map(String::as_str), Some("editor"));
    }

    #[test]
    fn test_partial_access_section_keeps_default_roles() {
        let cfg = parse_config("[access.requesters]\nalice = \"administrator\"\n").expect("parse");
        assert!(cfg.access.roles.contains_key(ADMINISTRATOR_ROLE));
        assert_eq!(cfg.access.requesters.len(), 1);
    }

    #[test]
    fn test_unknown_action_is_parse_error() {
        let result = parse_config("[access.roles]\nadministrator = [\"delete\"]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        assert!(matches!(
            parse_config("[[[ not valid toml"),
            Err(ConfigError::Parse(_))
        ));
    }

    // ── load_config ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("missing.toml")).expect("absent file is fine");
        assert_eq!(cfg, StoreConfig::default());
    }

    #[test]
    fn test_load_config_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects-store.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let cfg = load_config(&path).expect("load");

        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_load_config_on_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }
}
