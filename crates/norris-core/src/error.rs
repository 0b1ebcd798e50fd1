//! Error types for `norris-core`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// More facts were requested in one run than the remote API is asked for.
  #[error("refusing to fetch {requested} facts in one run (limit is {limit})")]
  TooManyFacts { requested: u32, limit: u32 },

  #[error("{0}")]
  Source(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

impl Error {
  pub fn from_source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Source(Box::new(err))
  }

  pub fn from_store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(err))
  }

  /// Whether this error means the fetch side gave up and nothing should be
  /// written.
  pub fn is_fetch_failure(&self) -> bool {
    matches!(self, Self::TooManyFacts { .. } | Self::Source(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
