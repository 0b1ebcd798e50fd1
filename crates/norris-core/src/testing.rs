//! In-memory fakes shared by the unit tests in this crate.

use std::{
  collections::VecDeque,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use chrono::Utc;
use thiserror::Error;

use crate::{
  fact::{Fact, NewFact},
  source::FactSource,
  store::FactStore,
};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct FakeError(pub String);

/// A deterministic fact for index `n`.
pub fn fact(n: u32) -> NewFact {
  NewFact::new(
    format!("id-{n}"),
    format!("https://api.chucknorris.io/jokes/id-{n}"),
    format!("Chuck Norris fact number {n}."),
  )
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// Replays a fixed script of responses, then fails.
pub struct ScriptedSource {
  script: Mutex<VecDeque<Result<NewFact, FakeError>>>,
  calls:  AtomicUsize,
}

impl ScriptedSource {
  pub fn new(script: impl IntoIterator<Item = Result<NewFact, FakeError>>) -> Self {
    Self {
      script: Mutex::new(script.into_iter().collect()),
      calls:  AtomicUsize::new(0),
    }
  }

  /// A source that returns `facts` in order.
  pub fn facts(facts: impl IntoIterator<Item = NewFact>) -> Self {
    Self::new(facts.into_iter().map(Ok))
  }

  pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl FactSource for ScriptedSource {
  type Error = FakeError;

  async fn fetch_one(&self) -> Result<NewFact, FakeError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self
      .script
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Err(FakeError("script exhausted".into())))
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A `Vec`-backed store handing out sequential ids.
#[derive(Default)]
pub struct MemoryStore {
  rows: Mutex<Vec<Fact>>,
}

impl MemoryStore {
  pub fn with(facts: impl IntoIterator<Item = NewFact>) -> Self {
    let store = Self::default();
    store.push(facts.into_iter().collect::<Vec<_>>().as_slice());
    store
  }

  pub fn rows(&self) -> Vec<Fact> { self.rows.lock().unwrap().clone() }

  fn push(&self, facts: &[NewFact]) -> Vec<Fact> {
    let mut rows = self.rows.lock().unwrap();
    let mut stored = Vec::with_capacity(facts.len());
    for f in facts {
      let fact = Fact {
        fact_id:     rows.len() as i64 + 1,
        external_id: f.external_id.clone(),
        url:         f.url.clone(),
        text:        f.text.clone(),
        recorded_at: Utc::now(),
      };
      rows.push(fact.clone());
      stored.push(fact);
    }
    stored
  }
}

impl FactStore for MemoryStore {
  type Error = FakeError;

  async fn read_all(&self) -> Result<Vec<Fact>, FakeError> { Ok(self.rows()) }

  async fn insert_all(&self, facts: &[NewFact]) -> Result<Vec<Fact>, FakeError> {
    Ok(self.push(facts))
  }

  async fn delete_all(&self) -> Result<u64, FakeError> {
    let mut rows = self.rows.lock().unwrap();
    let deleted = rows.len() as u64;
    rows.clear();
    Ok(deleted)
  }
}
