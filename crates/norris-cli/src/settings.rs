//! Runtime configuration, layered from defaults, an optional TOML file and
//! `NORRIS_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;

use crate::client::ApiConfig;

pub const DEFAULT_API_URL: &str = "https://api.chucknorris.io/jokes/random";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database file; a leading `~/` is expanded.
  pub store_path:       PathBuf,
  /// Endpoint returning one random fact per GET.
  pub api_url:          String,
  /// Category excluded through the `category!` filter; empty disables it.
  pub exclude_category: String,
  pub timeout_secs:     u64,
}

impl Settings {
  /// Load settings, treating a missing file at `path` as empty.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("store_path", "norris.db")?
      .set_default("api_url", DEFAULT_API_URL)?
      .set_default("exclude_category", "explicit")?
      .set_default("timeout_secs", 30)?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("NORRIS"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      url:              self.api_url.clone(),
      exclude_category: (!self.exclude_category.is_empty())
        .then(|| self.exclude_category.clone()),
      timeout:          Duration::from_secs(self.timeout_secs),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
