//! Error types for `roster-import`.

use thiserror::Error;

/// Why the candidate list could not be obtained. Any of these aborts the
/// whole import before a single row is written.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("invalid import URL {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("import source answered with HTTP {0}")]
  Status(reqwest::StatusCode),

  #[error("could not reach import source: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("import payload is malformed: {0}")]
  Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
  #[error("an import is already in progress")]
  AlreadyRunning,

  #[error("import failed: {0}")]
  Fetch(#[from] FetchError),

  /// The write phase failed; the batch was rolled back as a whole.
  #[error("saving imported contacts failed: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}
