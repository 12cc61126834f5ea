//! Where import candidates come from.

use std::{future::Future, time::Duration};

use reqwest::{Client, Url};
use tracing::debug;

use crate::{candidate::ImportCandidate, error::FetchError};

/// A provider of import candidates.
///
/// A fetch either yields the complete list or fails as a whole; there is no
/// partial result.
pub trait ContactSource: Send + Sync {
  fn fetch(
    &self,
  ) -> impl Future<Output = Result<Vec<ImportCandidate>, FetchError>> + Send + '_;
}

/// Fetches a JSON array of contacts with a single `GET`.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpSource {
  client: Client,
  url:    Url,
}

impl HttpSource {
  /// Build a source for `url`. Without a `timeout` the transport default
  /// applies.
  pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
      url:    url.to_owned(),
      reason: e.to_string(),
    })?;

    let mut builder = Client::builder();
    if let Some(t) = timeout {
      builder = builder.timeout(t);
    }

    Ok(Self {
      client: builder.build()?,
      url:    parsed,
    })
  }
}

impl ContactSource for HttpSource {
  async fn fetch(&self) -> Result<Vec<ImportCandidate>, FetchError> {
    debug!(url = %self.url, "fetching import candidates");

    let resp = self.client.get(self.url.clone()).send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::Status(status));
    }

    let body = resp.bytes().await?;
    let candidates: Vec<ImportCandidate> = serde_json::from_slice(&body)?;

    debug!(count = candidates.len(), "import candidates fetched");
    Ok(candidates)
  }
}
