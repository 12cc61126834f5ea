//! Layered configuration: optional TOML file, then `ROSTER_*` environment
//! variables (`__` separates nested keys, e.g. `ROSTER_IMPORT__URL`).

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;

/// File read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
  /// SQLite database file; a leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Seed two sample contacts into an empty store on startup.
  #[serde(default)]
  pub seed_demo: bool,

  #[serde(default)]
  pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
  /// Endpoint used by `roster import` when `--url` is not passed.
  pub url:          Option<String>,
  /// Request timeout; unset means the HTTP client's default.
  pub timeout_secs: Option<u64>,
}

impl ImportConfig {
  pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/roster/contacts.db") }

impl RosterConfig {
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);

    let settings = ::config::Config::builder()
      .add_source(::config::File::from(file.as_path()).required(path.is_some()))
      .add_source(
        ::config::Environment::with_prefix("ROSTER")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config from {}", file.display()))?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise RosterConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("roster-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn reads_nested_import_section() {
    let path = write_config(
      "full",
      r#"
        store_path = "/tmp/contacts.db"
        seed_demo  = true

        [import]
        url          = "https://example.com/users"
        timeout_secs = 5
      "#,
    );

    let cfg = RosterConfig::load(Some(&path)).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/contacts.db"));
    assert!(cfg.seed_demo);
    assert_eq!(cfg.import.url.as_deref(), Some("https://example.com/users"));
    assert_eq!(cfg.import.timeout(), Some(Duration::from_secs(5)));

    std::fs::remove_file(path).ok();
  }

  #[test]
  fn empty_file_uses_defaults() {
    let path = write_config("empty", "");

    let cfg = RosterConfig::load(Some(&path)).unwrap();
    assert!(!cfg.seed_demo);
    assert!(cfg.import.url.is_none());
    assert!(cfg.import.timeout().is_none());
    assert!(cfg.store_path.ends_with(".local/share/roster/contacts.db"));

    std::fs::remove_file(path).ok();
  }

  #[test]
  fn explicit_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("roster-definitely-missing.toml");
    assert!(RosterConfig::load(Some(&path)).is_err());
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    assert_eq!(expand_tilde(Path::new("/a/~/b")), PathBuf::from("/a/~/b"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    }
  }
}
