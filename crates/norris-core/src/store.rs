//! The `FactStore` trait.
//!
//! Implemented by storage backends (e.g. `norris-store-sqlite`). The
//! orchestration in [`crate::harvest`] depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::fact::{Fact, NewFact};

/// Abstraction over a persistent table of facts.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait FactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every persisted fact, oldest first.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Fact>, Self::Error>> + Send + '_;

  /// Persist `facts` as one unit and return the stored rows in input order.
  /// Surrogate ids and `recorded_at` are assigned by the store.
  fn insert_all<'a>(
    &'a self,
    facts: &'a [NewFact],
  ) -> impl Future<Output = Result<Vec<Fact>, Self::Error>> + Send + 'a;

  /// Delete every persisted fact; returns the number of rows removed.
  fn delete_all(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
