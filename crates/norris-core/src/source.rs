//! The `FactSource` trait: where new facts come from.

use std::future::Future;

use crate::fact::NewFact;

/// Something that hands out one random fact per call.
///
/// Each call is expected to be one round trip to the remote API; the fetch
/// and reconcile routines count calls against their limits.
pub trait FactSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a single fact. Consecutive calls may return the same fact.
  fn fetch_one(
    &self,
  ) -> impl Future<Output = Result<NewFact, Self::Error>> + Send + '_;
}
