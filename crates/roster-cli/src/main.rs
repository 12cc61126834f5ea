//! `roster` — command-line front end for the Roster contact book.
//!
//! # Usage
//!
//! ```text
//! roster list --search ali
//! roster add --name Alice --phone 0123456789 --email alice@example.com
//! roster favorite 3
//! roster delete 3
//! roster import --url https://example.com/contacts.json
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use roster_store_sqlite::{SqliteStore, demo_contacts};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{commands::Command, config::RosterConfig};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "A local contact book")]
struct Cli {
  /// Path to a TOML config file (default: ./roster.toml if present).
  #[arg(short, long, value_name = "FILE", env = "ROSTER_CONFIG")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so command output on stdout stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = RosterConfig::load(cli.config.as_deref())?;

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", cfg.store_path.display()))?;

  if cfg.seed_demo {
    store
      .seed_if_empty(demo_contacts())
      .await
      .context("failed to seed demo contacts")?;
  }

  let result = commands::run(cli.command, &store, &cfg).await;
  store.close().await.context("failed to close store")?;
  result
}
