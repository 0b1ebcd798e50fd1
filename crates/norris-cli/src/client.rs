//! Async HTTP client for the chucknorris.io random-joke endpoint.

use std::time::Duration;

use norris_core::{fact::NewFact, source::FactSource};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

/// Connection settings for the joke API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub url:              String,
  /// Sent as `category!=<value>` to keep a category out of the results.
  pub exclude_category: Option<String>,
  pub timeout:          Duration,
}

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("invalid API url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("request to {url} failed: {source}")]
  Request {
    url:    Url,
    source: reqwest::Error,
  },

  #[error("response status code does not indicate success: {0}")]
  Status(StatusCode),

  #[error("malformed fact from {url}: {source}")]
  Decode {
    url:    Url,
    source: reqwest::Error,
  },
}

/// A [`FactSource`] issuing one GET per fact.
///
/// Cheap to clone since the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpFactSource {
  client: Client,
  url:    Url,
}

impl HttpFactSource {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let mut url = Url::parse(&config.url).map_err(|e| ClientError::InvalidUrl {
      url:    config.url.clone(),
      reason: e.to_string(),
    })?;
    if let Some(category) = &config.exclude_category {
      url.set_query(Some(&format!("category!={category}")));
    }

    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self { client, url })
  }

  pub fn url(&self) -> &Url { &self.url }
}

impl FactSource for HttpFactSource {
  type Error = ClientError;

  async fn fetch_one(&self) -> Result<NewFact, ClientError> {
    debug!(url = %self.url, "GET");
    let resp = self
      .client
      .get(self.url.clone())
      .send()
      .await
      .map_err(|source| ClientError::Request { url: self.url.clone(), source })?;

    let status = resp.status();
    if !status.is_success() {
      return Err(ClientError::Status(status));
    }

    let fact: NewFact = resp
      .json()
      .await
      .map_err(|source| ClientError::Decode { url: self.url.clone(), source })?;
    debug!(external_id = %fact.external_id, "received fact");
    Ok(fact)
  }
}
