//! Phone-based membership test between remote candidates and local contacts.

use std::collections::HashSet;

use roster_core::{NewContact, list::ContactList};

use crate::candidate::ImportCandidate;

/// The outcome of planning an import against a snapshot of local contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
  /// Candidates with an unseen phone number, in the order received.
  pub to_insert: Vec<NewContact>,
  /// Candidates dropped because their phone was already known.
  pub skipped:   Vec<ImportCandidate>,
}

/// Decide which candidates to insert.
///
/// Only the phone number takes part in the membership test; name and email
/// are ignored, and a match never updates the local record. A phone that
/// repeats an earlier candidate in the same batch is skipped too, so every
/// new phone ends up with exactly one record.
pub fn plan_import(
  candidates: Vec<ImportCandidate>,
  snapshot: &ContactList,
) -> ImportPlan {
  let known = snapshot.phones();
  let mut seen = HashSet::new();
  let mut plan = ImportPlan::default();

  for candidate in candidates {
    if known.contains(candidate.phone.as_str()) || !seen.insert(candidate.phone.clone()) {
      plan.skipped.push(candidate);
    } else {
      plan.to_insert.push(candidate.into());
    }
  }

  plan
}
