//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("invalid created_at timestamp: {0} ms")]
  Timestamp(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
