//! Fact types: one joke as served by the remote API and as kept in the
//! store.
//!
//! Facts are compared by value. The surrogate id assigned by the store never
//! takes part in equality; [`FactKey`] is the identity used for every
//! duplicate check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest provider id the store accepts.
pub const MAX_EXTERNAL_ID_LEN: usize = 40;

/// Longest permalink the store accepts.
pub const MAX_URL_LEN: usize = 1024;

// ─── FactKey ─────────────────────────────────────────────────────────────────

/// The value identity of a fact: provider id, permalink and body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactKey<'a> {
  pub external_id: &'a str,
  pub url:         &'a str,
  pub text:        &'a str,
}

// ─── NewFact ─────────────────────────────────────────────────────────────────

/// A fact that has not been persisted yet.
///
/// Deserialises directly from the body of
/// `GET https://api.chucknorris.io/jokes/random`; fields the API sends beyond
/// `id`, `url` and `value` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFact {
  #[serde(rename = "id")]
  pub external_id: String,
  pub url:         String,
  #[serde(rename = "value")]
  pub text:        String,
}

impl NewFact {
  pub fn new(
    external_id: impl Into<String>,
    url: impl Into<String>,
    text: impl Into<String>,
  ) -> Self {
    Self {
      external_id: external_id.into(),
      url:         url.into(),
      text:        text.into(),
    }
  }

  pub fn key(&self) -> FactKey<'_> {
    FactKey {
      external_id: &self.external_id,
      url:         &self.url,
      text:        &self.text,
    }
  }
}

// ─── Fact ────────────────────────────────────────────────────────────────────

/// A persisted fact. Once written, no field is ever updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
  /// Store-assigned surrogate id.
  pub fact_id:     i64,
  pub external_id: String,
  pub url:         String,
  pub text:        String,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}

impl Fact {
  pub fn key(&self) -> FactKey<'_> {
    FactKey {
      external_id: &self.external_id,
      url:         &self.url,
      text:        &self.text,
    }
  }
}
