//! Core types and trait definitions for the Roster contact book.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend, the importer and the command-line front end all
//! depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod list;
pub mod store;

pub use contact::{Contact, ContactDraft, ContactId, NewContact};
pub use error::{Error, Result};
