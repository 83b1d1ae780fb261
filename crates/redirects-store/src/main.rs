//! Redirects store command-line entry point.
//!
//! Downloads the current redirects file or uploads a replacement, on behalf
//! of a named requester whose permissions come from the config file.
//!
//! # Usage
//!
//! ```text
//! redirects-store [OPTIONS] --requester <ID> <COMMAND>
//!
//! Commands:
//!   download  Print (or save) the current redirects
//!   upload    Replace the current redirects with FILE
//!
//! Options:
//!   --config      <FILE>  Config file [default: redirects-store.toml]
//!   --content-dir <DIR>   Overrides storage.content_dir from the config
//!   --requester   <ID>    Identity used for the permission check
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Description                        |
//! |--------------------------|------------------------------------|
//! | `REDIRECTS_STORE_CONFIG` | Config file path                   |
//! | `REDIRECTS_CONTENT_DIR`  | Content data directory             |
//! | `REDIRECTS_REQUESTER`    | Requester id                       |
//! | `RUST_LOG`               | Log filter; beats `logging.level`  |
//!
//! # Exit status
//!
//! `0` on success, `1` for any failure.  The error kind (bad request, no
//! permission, …) is printed with the message.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use redirects_core::Requester;
use redirects_store::application::manage_redirects::{RedirectsService, RequestContext};
use redirects_store::infrastructure::permissions::RolePermissions;
use redirects_store::infrastructure::reload::WatchReloadNotifier;
use redirects_store::infrastructure::storage::config::{load_config, StoreConfig};
use redirects_store::infrastructure::storage::RedirectsPaths;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Download or upload the redirects configuration with automatic backups.
#[derive(Debug, Parser)]
#[command(name = "redirects-store", version)]
struct Cli {
    /// Path to the TOML config file.  A missing file means "all defaults".
    #[arg(
        long,
        default_value = "redirects-store.toml",
        env = "REDIRECTS_STORE_CONFIG"
    )]
    config: PathBuf,

    /// Directory holding redirects.json and its backups.
    #[arg(long, env = "REDIRECTS_CONTENT_DIR")]
    content_dir: Option<PathBuf>,

    /// Requester id checked against the `[access]` table.
    #[arg(long, env = "REDIRECTS_REQUESTER")]
    requester: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current redirects as JSON, or write them to --output.
    Download {
        /// Write to this file instead of standard output.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Back up the current redirects and replace them with FILE.
    Upload {
        /// JSON file holding the new redirect rules.
        file: PathBuf,
    },
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    fn apply_overrides(&self, mut config: StoreConfig) -> StoreConfig {
        if let Some(dir) = &self.content_dir {
            config.storage.content_dir = dir.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let config = cli.apply_overrides(config);

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths = RedirectsPaths::new(&config.storage.content_dir);
    info!(content_dir = %paths.content_dir().display(), "redirects store starting");

    let reload = Arc::new(WatchReloadNotifier::new());
    let service = RedirectsService::new(
        paths,
        Arc::new(RolePermissions::from(&config.access)),
        reload,
    );
    let ctx = RequestContext::new(Requester::new(cli.requester.clone()));

    match cli.command {
        Command::Download { output } => {
            let set = service.download(&ctx).await.context("download failed")?;
            let json = serde_json::to_string_pretty(&set).context("rendering redirects")?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        Command::Upload { file } => {
            let report = service
                .upload(&ctx, &file)
                .await
                .with_context(|| format!("upload of {} failed", file.display()))?;
            match &report.backup_path {
                Some(backup) => println!(
                    "uploaded {} redirects; previous file saved as {}",
                    report.rule_count,
                    backup.display()
                ),
                None => println!("uploaded {} redirects", report.rule_count),
            }
        }
    }

    Ok(())
}
