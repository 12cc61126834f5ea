//! Contact types — the single entity of the Roster contact book.
//!
//! A [`Contact`] is what the store hands back; a [`NewContact`] is what
//! callers hand in; a [`ContactDraft`] is raw user input that has not yet
//! passed the edit boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned contact identifier. Never reused once handed out.
pub type ContactId = i64;

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         ContactId,
  pub name:       String,
  /// Used as the de-duplication key during import. Not unique in the store.
  pub phone:      String,
  pub email:      Option<String>,
  pub favorite:   bool,
  /// Store-assigned creation time; never changes after creation.
  pub created_at: DateTime<Utc>,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::create`] and
/// [`crate::store::ContactStore::update`].
///
/// `id`, `favorite` and `created_at` are always owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
  pub name:  String,
  pub phone: String,
  pub email: Option<String>,
}

impl NewContact {
  pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
    Self {
      name:  name.into(),
      phone: phone.into(),
      email: None,
    }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }
}

// ─── ContactDraft ────────────────────────────────────────────────────────────

/// Unvalidated form input, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
  pub name:  String,
  pub phone: String,
  #[serde(default)]
  pub email: String,
}

impl ContactDraft {
  /// Check the draft and turn it into a [`NewContact`].
  ///
  /// All fields are trimmed. The name must be non-empty; an empty email is
  /// treated as absent, a non-empty one must contain `@`. The phone number is
  /// accepted as-is.
  pub fn validate(&self) -> Result<NewContact> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(Error::EmptyName);
    }

    let email = match self.email.trim() {
      "" => None,
      e if e.contains('@') => Some(e.to_owned()),
      e => return Err(Error::InvalidEmail(e.to_owned())),
    };

    Ok(NewContact {
      name: name.to_owned(),
      phone: self.phone.trim().to_owned(),
      email,
    })
  }
}
