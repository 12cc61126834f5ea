//! Error types for `roster-core`.
//!
//! These are edit-boundary errors: they are raised before a store is ever
//! touched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("name must not be empty")]
  EmptyName,

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
