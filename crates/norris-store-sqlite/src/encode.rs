//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use norris_core::fact::Fact;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `facts` row.
pub struct RawFact {
  pub fact_id:     i64,
  pub external_id: String,
  pub url:         String,
  pub text:        String,
  pub recorded_at: String,
}

impl RawFact {
  pub const COLUMNS: &'static str = "fact_id, external_id, url, text, recorded_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      fact_id:     row.get(0)?,
      external_id: row.get(1)?,
      url:         row.get(2)?,
      text:        row.get(3)?,
      recorded_at: row.get(4)?,
    })
  }

  pub fn into_fact(self) -> Result<Fact> {
    Ok(Fact {
      fact_id:     self.fact_id,
      external_id: self.external_id,
      url:         self.url,
      text:        self.text,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}
