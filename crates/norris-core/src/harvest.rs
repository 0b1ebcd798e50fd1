//! One run of the tool: fetch, reconcile against the store, insert.

use std::str::FromStr;

use tracing::info;

use crate::{
  Error, Result,
  fetch::{DEFAULT_FACT_COUNT, retrieve_facts},
  reconcile::reconcile,
  source::FactSource,
  store::FactStore,
};

// ─── Command ─────────────────────────────────────────────────────────────────

/// What a run should do, parsed from the single positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  /// Fetch and insert `count` new facts.
  Fetch { count: u32 },
  /// Delete every stored fact.
  Clear,
}

impl Default for Command {
  fn default() -> Self { Self::Fetch { count: DEFAULT_FACT_COUNT } }
}

#[derive(Debug, thiserror::Error)]
#[error("expected a fact count or `clear`, got {0:?}")]
pub struct ParseCommandError(String);

impl FromStr for Command {
  type Err = ParseCommandError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("clear") {
      return Ok(Self::Clear);
    }
    s.parse::<u32>()
      .map(|count| Self::Fetch { count })
      .map_err(|_| ParseCommandError(s.to_owned()))
  }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Inserted {
    inserted:  usize,
    /// The reconcile budget ran out before the batch was fully checked.
    exhausted: bool,
  },
  Cleared { deleted: u64 },
  /// Fetching failed or was refused; nothing was written.
  Aborted { reason: String },
}

// ─── Run ─────────────────────────────────────────────────────────────────────

/// Execute `command` against `store`, drawing new facts from `source`.
///
/// Fetch-side failures become [`Outcome::Aborted`]; store failures are
/// returned as [`Error::Store`].
pub async fn run<St, Src>(command: Command, store: &St, source: &Src) -> Result<Outcome>
where
  St: FactStore,
  Src: FactSource,
{
  let count = match command {
    Command::Clear => {
      let deleted = store.delete_all().await.map_err(Error::from_store)?;
      info!(deleted, "cleared stored facts");
      return Ok(Outcome::Cleared { deleted });
    }
    Command::Fetch { count } => count,
  };

  let mut batch = match retrieve_facts(source, count).await {
    Ok(batch) => batch,
    Err(e) if e.is_fetch_failure() => return Ok(aborted(e)),
    Err(e) => return Err(e),
  };

  let existing = store.read_all().await.map_err(Error::from_store)?;

  let reconciliation = match reconcile(&existing, &mut batch, source).await {
    Ok(r) => r,
    Err(e) if e.is_fetch_failure() => return Ok(aborted(e)),
    Err(e) => return Err(e),
  };

  let inserted = store.insert_all(&batch).await.map_err(Error::from_store)?;
  info!(
    inserted = inserted.len(),
    replacements = reconciliation.replacements,
    "inserted facts"
  );

  Ok(Outcome::Inserted {
    inserted:  inserted.len(),
    exhausted: reconciliation.exhausted,
  })
}

fn aborted(err: Error) -> Outcome { Outcome::Aborted { reason: err.to_string() } }
