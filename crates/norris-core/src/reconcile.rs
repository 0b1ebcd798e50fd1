//! Reconciliation of a freshly fetched batch against the facts already
//! stored.
//!
//! Every candidate that is already stored (or already accepted earlier in the
//! batch) is swapped for a newly fetched fact. Replacements are drawn from a
//! single budget shared by the whole batch; once it is spent the walk stops
//! and the rest of the batch is kept without further fetching.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
  Error, Result,
  fact::{Fact, FactKey, NewFact},
  source::FactSource,
};

/// Replacement fetches allowed per reconcile call, across all candidates.
pub const RETRY_BUDGET: u32 = 10;

/// Result of a [`reconcile`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
  /// The budget ran out: the source most likely has nothing new left.
  pub exhausted:    bool,
  /// Replacement fetches performed.
  pub replacements: u32,
}

/// Replace colliding candidates in place.
///
/// `candidates` is rebuilt slot by slot from a snapshot of its input. A slot
/// whose fact collides is refilled from `source` and examined again. When a
/// slot is examined after [`RETRY_BUDGET`] replacements the walk stops and the
/// call reports `exhausted`: that slot and the candidates not yet walked stay
/// in the batch, minus any that match a stored or already kept fact. No
/// further fetch is made for them.
pub async fn reconcile<S: FactSource>(
  existing: &[Fact],
  candidates: &mut Vec<NewFact>,
  source: &S,
) -> Result<Reconciliation> {
  let stored: HashSet<FactKey<'_>> = existing.iter().map(Fact::key).collect();

  let mut pending = std::mem::take(candidates).into_iter();
  let mut replacements = 0;

  while let Some(mut candidate) = pending.next() {
    loop {
      if replacements >= RETRY_BUDGET {
        warn!(replacements, "retry budget spent; no new facts left to find");
        for rest in std::iter::once(candidate).chain(pending) {
          if !collides(&stored, candidates, &rest) {
            candidates.push(rest);
          }
        }
        return Ok(Reconciliation { exhausted: true, replacements });
      }

      if !collides(&stored, candidates, &candidate) {
        break;
      }

      debug!(external_id = %candidate.external_id, "already stored, fetching a replacement");
      candidate = source.fetch_one().await.map_err(Error::from_source)?;
      replacements += 1;
    }

    candidates.push(candidate);
  }

  Ok(Reconciliation { exhausted: false, replacements })
}

/// A fact collides when it is stored or already kept in this batch.
fn collides<'a>(
  stored: &HashSet<FactKey<'a>>,
  kept: &[NewFact],
  fact: &'a NewFact,
) -> bool {
  stored.contains(&fact.key()) || kept.iter().any(|f| f.key() == fact.key())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    store::FactStore,
    testing::{FakeError, MemoryStore, ScriptedSource, fact},
  };

  async fn stored(facts: impl IntoIterator<Item = NewFact>) -> Vec<Fact> {
    MemoryStore::with(facts).read_all().await.unwrap()
  }

  #[tokio::test]
  async fn colliding_candidate_is_replaced_in_place() {
    let (a, b, c, d) = (fact(1), fact(2), fact(3), fact(4));
    let existing = stored([a.clone(), b]).await;
    let mut batch = vec![a, c.clone()];
    let source = ScriptedSource::facts([d.clone()]);

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert_eq!(batch, vec![d, c]);
    assert_eq!(outcome, Reconciliation { exhausted: false, replacements: 1 });
    assert_eq!(source.calls(), 1);
  }

  #[tokio::test]
  async fn fresh_batch_is_left_alone() {
    let existing = stored([fact(1), fact(2)]).await;
    let mut batch = vec![fact(3), fact(4), fact(5)];
    let source = ScriptedSource::facts([]);

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert_eq!(batch, vec![fact(3), fact(4), fact(5)]);
    assert!(!outcome.exhausted);
    assert_eq!(source.calls(), 0);
  }

  #[tokio::test]
  async fn replacement_is_checked_again() {
    // The first replacement is also stored, the second is new.
    let existing = stored([fact(1), fact(2)]).await;
    let mut batch = vec![fact(1), fact(3)];
    let source = ScriptedSource::facts([fact(2), fact(4)]);

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert_eq!(batch, vec![fact(4), fact(3)]);
    assert_eq!(outcome.replacements, 2);
    assert!(!outcome.exhausted);
  }

  #[tokio::test]
  async fn replacement_duplicating_the_batch_is_replaced() {
    let existing = stored([fact(1)]).await;
    let mut batch = vec![fact(2), fact(1)];
    let source = ScriptedSource::facts([fact(2), fact(3)]);

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert_eq!(batch, vec![fact(2), fact(3)]);
    assert_eq!(outcome.replacements, 2);
  }

  #[tokio::test]
  async fn budget_exhaustion_stops_the_walk() {
    let existing = stored([fact(1)]).await;
    let mut batch = vec![fact(1), fact(2), fact(3)];
    let source = ScriptedSource::facts(std::iter::repeat_n(fact(1), 15));

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert_eq!(
      outcome,
      Reconciliation { exhausted: true, replacements: RETRY_BUDGET }
    );
    assert_eq!(source.calls(), RETRY_BUDGET as usize);
    // The colliding slot is dropped; the unwalked tail is kept.
    assert_eq!(batch, vec![fact(2), fact(3)]);
  }

  #[tokio::test]
  async fn unwalked_tail_is_filtered_without_fetching() {
    let existing = stored([fact(1), fact(3)]).await;
    let mut batch = vec![fact(1), fact(2), fact(3), fact(4)];
    let source = ScriptedSource::facts(std::iter::repeat_n(fact(1), 15));

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert!(outcome.exhausted);
    assert_eq!(source.calls(), RETRY_BUDGET as usize);
    assert_eq!(batch, vec![fact(2), fact(4)]);
  }

  #[tokio::test]
  async fn budget_is_shared_across_candidates() {
    let existing = stored([fact(1), fact(2)]).await;
    let mut batch = vec![fact(1), fact(2), fact(3)];
    // Eight misses on the first slot, then a hit; the second slot spends the
    // last replacement and is examined with the budget gone.
    let mut script: Vec<NewFact> = std::iter::repeat_n(fact(2), 8).collect();
    script.push(fact(4));
    script.push(fact(5));
    let source = ScriptedSource::facts(script);

    let outcome = reconcile(&existing, &mut batch, &source).await.unwrap();

    assert!(outcome.exhausted);
    assert_eq!(outcome.replacements, RETRY_BUDGET);
    assert_eq!(batch, vec![fact(4), fact(5), fact(3)]);
  }

  #[tokio::test]
  async fn source_failure_during_replacement_propagates() {
    let existing = stored([fact(1)]).await;
    let mut batch = vec![fact(1)];
    let source = ScriptedSource::new([Err(FakeError("connection reset".into()))]);

    let err = reconcile(&existing, &mut batch, &source).await.unwrap_err();
    assert!(matches!(err, Error::Source(_)));
  }
}
