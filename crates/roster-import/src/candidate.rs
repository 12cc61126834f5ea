//! The wire shape of one remote contact.

use roster_core::NewContact;
use serde::{Deserialize, Serialize};

/// One element of the JSON array served by the import endpoint.
///
/// `name` and `phone` are required; `email` may be missing, `null` or an
/// empty string. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCandidate {
  pub name:  String,
  pub phone: String,
  #[serde(default)]
  pub email: Option<String>,
}

impl From<ImportCandidate> for NewContact {
  fn from(c: ImportCandidate) -> Self {
    NewContact {
      name:  c.name,
      phone: c.phone,
      email: c.email.filter(|e| !e.trim().is_empty()),
    }
  }
}
