//! [`SqliteStore`], the SQLite implementation of [`FactStore`].

use std::path::Path;

use chrono::Utc;
use tracing::debug;

use norris_core::{
  fact::{Fact, NewFact},
  store::FactStore,
};

use crate::{
  Error, Result,
  encode::{RawFact, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fact table backed by a single SQLite file.
///
/// Cloning is cheap since the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    debug!(path = %path.as_ref().display(), "opening fact store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for SqliteStore {
  type Error = Error;

  async fn read_all(&self) -> Result<Vec<Fact>> {
    let raws: Vec<RawFact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM facts ORDER BY fact_id",
          RawFact::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawFact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFact::into_fact).collect()
  }

  async fn insert_all(&self, facts: &[NewFact]) -> Result<Vec<Fact>> {
    if facts.is_empty() {
      return Ok(Vec::new());
    }

    let recorded_at = Utc::now();
    let at_str      = encode_dt(recorded_at);
    let owned       = facts.to_vec();

    // One transaction: either the whole batch lands or none of it.
    let ids: Vec<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(owned.len());
        {
          let mut stmt = tx.prepare(
            "INSERT INTO facts (external_id, url, text, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for f in &owned {
            ids.push(stmt.insert(rusqlite::params![
              f.external_id,
              f.url,
              f.text,
              at_str,
            ])?);
          }
        }
        tx.commit()?;
        Ok(ids)
      })
      .await?;

    Ok(
      facts
        .iter()
        .zip(ids)
        .map(|(f, fact_id)| Fact {
          fact_id,
          external_id: f.external_id.clone(),
          url: f.url.clone(),
          text: f.text.clone(),
          recorded_at,
        })
        .collect(),
    )
  }

  async fn delete_all(&self) -> Result<u64> {
    let deleted = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM facts", [])?))
      .await?;
    Ok(deleted as u64)
  }
}
