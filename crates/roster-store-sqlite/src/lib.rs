//! SQLite backend for the Roster contact book.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. That thread is also the single
//! writer: every statement is queued through it in order.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteStore, demo_contacts};

#[cfg(test)]
mod tests;
