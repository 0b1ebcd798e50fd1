//! Retrieval of a batch of distinct facts from a [`FactSource`].

use tracing::debug;

use crate::{Error, Result, fact::NewFact, source::FactSource};

/// Facts fetched when no count is given.
pub const DEFAULT_FACT_COUNT: u32 = 5;

/// Upper bound on facts fetched in one run, to keep the remote API unhammered.
pub const MAX_FACTS_PER_RUN: u32 = 10;

/// Fetch `count` facts that are pairwise distinct by value.
///
/// A fetched fact equal to one already in the batch is discarded and the
/// request is repeated, so the batch always ends up with exactly `count`
/// entries. The loop does not terminate if the source cannot produce `count`
/// distinct facts.
///
/// Returns [`Error::TooManyFacts`] without issuing any request when `count`
/// exceeds [`MAX_FACTS_PER_RUN`], and [`Error::Source`] as soon as any request
/// fails; a partial batch is never returned.
pub async fn retrieve_facts<S: FactSource>(
  source: &S,
  count: u32,
) -> Result<Vec<NewFact>> {
  if count > MAX_FACTS_PER_RUN {
    return Err(Error::TooManyFacts {
      requested: count,
      limit:     MAX_FACTS_PER_RUN,
    });
  }

  let wanted = count as usize;
  let mut batch: Vec<NewFact> = Vec::with_capacity(wanted);

  while batch.len() < wanted {
    let fact = source.fetch_one().await.map_err(Error::from_source)?;

    if batch.iter().any(|f| f.key() == fact.key()) {
      debug!(external_id = %fact.external_id, "duplicate in batch, fetching again");
      continue;
    }
    batch.push(fact);
  }

  Ok(batch)
}
