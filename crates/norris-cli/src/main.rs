//! `norris`: collect Chuck Norris facts into a local SQLite database.
//!
//! # Usage
//!
//! ```text
//! norris          # fetch and store 5 new facts
//! norris 8        # fetch and store 8 new facts (at most 10)
//! norris clear    # delete every stored fact
//! norris --config ~/.config/norris/norris.toml 3
//! ```

mod client;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use client::HttpFactSource;
use norris_core::harvest::{self, Command, Outcome};
use norris_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "norris",
  author,
  version,
  about = "Collect Chuck Norris facts into a local database"
)]
struct Cli {
  /// Number of facts to fetch (default 5, at most 10), or `clear` to delete
  /// every stored fact.
  #[arg(value_name = "COUNT|clear")]
  command: Option<Command>,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "norris.toml")]
  config: PathBuf,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout carries only the run summary.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store_path = settings.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let source = HttpFactSource::new(settings.api_config())
    .context("failed to set up the joke API client")?;
  tracing::debug!(url = %source.url(), store = ?store_path, "starting run");

  let outcome = harvest::run(cli.command.unwrap_or_default(), &store, &source).await?;

  for line in summary(&outcome) {
    println!("{line}");
  }
  Ok(())
}

/// Lines printed for a finished run.
fn summary(outcome: &Outcome) -> Vec<String> {
  match outcome {
    Outcome::Inserted { inserted, exhausted } => {
      let mut lines = vec![format!("{inserted} Fact(s) inserted")];
      if *exhausted {
        lines.push("You got all Facts in your database".to_string());
      }
      lines
    }
    Outcome::Cleared { .. } => Vec::new(),
    Outcome::Aborted { reason } => vec![reason.clone()],
  }
}
