//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-import`, `roster-cli`) depend on this abstraction,
//! not on any concrete backend.
//!
//! Operating on an id that does not exist is never an error: updates and
//! favorite changes return `None`, deletes return `false`.

use std::future::Future;

use crate::contact::{Contact, ContactId, NewContact};

/// Abstraction over a Roster contact store backend.
///
/// Every mutating method returns the affected record so callers can patch an
/// in-memory list instead of reloading it (see [`crate::list::ContactChange`]).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new contact. The store assigns `id` and `created_at`;
  /// `favorite` starts out `false`. Phone numbers are not checked for
  /// uniqueness.
  fn create(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite name, phone and email of an existing contact. `favorite` and
  /// `created_at` are left alone. Returns `None` if `id` does not exist.
  fn update(
    &self,
    id: ContactId,
    input: NewContact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Set the favorite flag. Returns `None` if `id` does not exist.
  fn set_favorite(
    &self,
    id: ContactId,
    favorite: bool,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Flip the favorite flag. Returns `None` if `id` does not exist.
  fn toggle_favorite(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove a contact. Returns `false` if nothing was deleted, so repeating
  /// a delete is harmless.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert every contact whose phone is not already stored, as one atomic
  /// unit. The phone check runs at insert time, so contacts added since the
  /// caller last looked are still honoured, and a phone repeated within
  /// `inputs` is only inserted once.
  ///
  /// Returns the contacts actually inserted, in input order.
  fn insert_absent(
    &self,
    inputs: Vec<NewContact>,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// All contacts, most recently created first (`id` descending).
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// The most recently created contact with exactly this phone number.
  fn find_by_phone<'a>(
    &'a self,
    phone: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;
}
