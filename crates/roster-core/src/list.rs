//! In-memory contact list with search and favorite filtering.
//!
//! The list mirrors what [`ContactStore::list`](crate::store::ContactStore::list)
//! returns (newest first) and is kept current by applying the records that
//! store mutations hand back, rather than reloading after every change.

use std::{cmp::Reverse, collections::HashSet};

use crate::contact::{Contact, ContactId};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Search text and favorite toggle as entered in the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
  /// Matched case-insensitively as a substring of name, phone or email.
  /// Blank text matches everything.
  pub text:           Option<String>,
  pub favorites_only: bool,
}

impl ContactFilter {
  pub fn text(text: impl Into<String>) -> Self {
    Self {
      text:           Some(text.into()),
      favorites_only: false,
    }
  }

  pub fn favorites() -> Self {
    Self {
      text:           None,
      favorites_only: true,
    }
  }

  pub fn matches(&self, contact: &Contact) -> bool {
    if self.favorites_only && !contact.favorite {
      return false;
    }

    let Some(needle) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    else {
      return true;
    };

    let needle = needle.to_lowercase();
    contact.name.to_lowercase().contains(&needle)
      || contact.phone.to_lowercase().contains(&needle)
      || contact
        .email
        .as_deref()
        .is_some_and(|e| e.to_lowercase().contains(&needle))
  }
}

// ─── Change ──────────────────────────────────────────────────────────────────

/// A localized update produced by a store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactChange {
  Created(Contact),
  Updated(Contact),
  Removed(ContactId),
}

// ─── List ────────────────────────────────────────────────────────────────────

/// Contacts ordered by `id` descending.
#[derive(Debug, Clone, Default)]
pub struct ContactList {
  contacts: Vec<Contact>,
}

impl ContactList {
  pub fn new(contacts: Vec<Contact>) -> Self {
    let mut list = Self::default();
    list.replace(contacts);
    list
  }

  /// Full reload.
  pub fn replace(&mut self, mut contacts: Vec<Contact>) {
    contacts.sort_by_key(|c| Reverse(c.id));
    self.contacts = contacts;
  }

  pub fn apply(&mut self, change: ContactChange) {
    match change {
      ContactChange::Created(c) | ContactChange::Updated(c) => self.upsert(c),
      ContactChange::Removed(id) => self.contacts.retain(|c| c.id != id),
    }
  }

  fn upsert(&mut self, contact: Contact) {
    match self.contacts.binary_search_by_key(&Reverse(contact.id), |c| Reverse(c.id)) {
      Ok(pos) => self.contacts[pos] = contact,
      Err(pos) => self.contacts.insert(pos, contact),
    }
  }

  pub fn get(&self, id: ContactId) -> Option<&Contact> {
    self.contacts.iter().find(|c| c.id == id)
  }

  pub fn all(&self) -> &[Contact] { &self.contacts }

  pub fn filtered(&self, filter: &ContactFilter) -> Vec<&Contact> {
    self.contacts.iter().filter(|c| filter.matches(c)).collect()
  }

  /// Phone numbers currently in the list.
  pub fn phones(&self) -> HashSet<&str> {
    self.contacts.iter().map(|c| c.phone.as_str()).collect()
  }

  pub fn len(&self) -> usize { self.contacts.len() }

  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }
}
