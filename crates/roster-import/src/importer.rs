//! The import state machine.
//!
//! ```text
//! Idle ──run──▶ Fetching ──ok──▶ Merging ──ok──▶ Idle
//!                  │                │
//!                  └──err──▶ Failed(msg) ◀──err──┘
//! ```
//!
//! `run` is refused while `Fetching` or `Merging`. `Failed` is a resting
//! state; the next `run` starts over from it.

use std::sync::{Arc, Mutex, PoisonError};

use roster_core::{Contact, list::ContactList, store::ContactStore};
use tracing::{debug, info, warn};

use crate::{
  candidate::ImportCandidate, error::ImportError, merge::plan_import,
  source::ContactSource,
};

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportState {
  #[default]
  Idle,
  Fetching,
  Merging,
  /// The last run failed with this user-facing message.
  Failed(String),
}

impl ImportState {
  /// Whether a run is in flight; the triggering action should be disabled.
  pub fn is_busy(&self) -> bool { matches!(self, Self::Fetching | Self::Merging) }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// Summary of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
  /// Number of candidates the source returned.
  pub fetched:  usize,
  /// Newly created contacts, in the order received.
  pub inserted: Vec<Contact>,
  /// Candidates left alone because their phone was already present.
  pub skipped:  usize,
}

// ─── Importer ────────────────────────────────────────────────────────────────

/// Runs imports from one source into one store, one at a time.
pub struct Importer<S, F> {
  store:  Arc<S>,
  source: F,
  state:  Mutex<ImportState>,
}

impl<S, F> Importer<S, F>
where
  S: ContactStore,
  F: ContactSource,
{
  pub fn new(store: Arc<S>, source: F) -> Self {
    Self {
      store,
      source,
      state: Mutex::new(ImportState::Idle),
    }
  }

  pub fn state(&self) -> ImportState {
    self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  /// Fetch, then insert every candidate whose phone is not yet stored.
  ///
  /// Membership is planned against the store's current contents.
  pub async fn run(&self) -> Result<ImportReport, ImportError> {
    let guard = RunGuard::begin(&self.state)?;
    let result = self.fetch_and_merge(&guard, None).await;
    guard.complete(&result);
    result
  }

  /// Like [`run`](Self::run), but plans against a caller-held snapshot, such
  /// as the list currently on screen. The store still re-checks every phone
  /// at insert time, so a stale snapshot cannot cause duplicates.
  pub async fn run_with_snapshot(
    &self,
    snapshot: &ContactList,
  ) -> Result<ImportReport, ImportError> {
    let guard = RunGuard::begin(&self.state)?;
    let result = self.fetch_and_merge(&guard, Some(snapshot)).await;
    guard.complete(&result);
    result
  }

  async fn fetch_and_merge(
    &self,
    guard: &RunGuard<'_>,
    snapshot: Option<&ContactList>,
  ) -> Result<ImportReport, ImportError> {
    let candidates = self.source.fetch().await?;
    guard.set(ImportState::Merging);

    match snapshot {
      Some(snapshot) => self.merge(candidates, snapshot).await,
      None => {
        let current = self.store.list().await.map_err(store_error)?;
        self.merge(candidates, &ContactList::new(current)).await
      }
    }
  }

  async fn merge(
    &self,
    candidates: Vec<ImportCandidate>,
    snapshot: &ContactList,
  ) -> Result<ImportReport, ImportError> {
    let fetched = candidates.len();
    let plan = plan_import(candidates, snapshot);
    debug!(
      planned = plan.to_insert.len(),
      skipped = plan.skipped.len(),
      "import planned"
    );

    let inserted = if plan.to_insert.is_empty() {
      Vec::new()
    } else {
      self
        .store
        .insert_absent(plan.to_insert)
        .await
        .map_err(store_error)?
    };

    Ok(ImportReport {
      fetched,
      skipped: fetched - inserted.len(),
      inserted,
    })
  }
}

fn store_error<E>(e: E) -> ImportError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ImportError::Store(Box::new(e))
}

// ─── Run guard ───────────────────────────────────────────────────────────────

/// Owns the "busy" state for the duration of one run. Dropping it without
/// [`complete`](Self::complete) (e.g. when the run future is cancelled)
/// returns the importer to `Idle`.
struct RunGuard<'a> {
  state:     &'a Mutex<ImportState>,
  completed: bool,
}

impl<'a> RunGuard<'a> {
  fn begin(state: &'a Mutex<ImportState>) -> Result<Self, ImportError> {
    let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
    if current.is_busy() {
      return Err(ImportError::AlreadyRunning);
    }
    *current = ImportState::Fetching;
    Ok(Self { state, completed: false })
  }

  fn set(&self, next: ImportState) {
    *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
  }

  fn complete(mut self, result: &Result<ImportReport, ImportError>) {
    match result {
      Ok(report) => {
        info!(
          fetched = report.fetched,
          inserted = report.inserted.len(),
          skipped = report.skipped,
          "import finished"
        );
        self.set(ImportState::Idle);
      }
      Err(e) => {
        warn!(error = %e, "import failed");
        self.set(ImportState::Failed(e.to_string()));
      }
    }
    self.completed = true;
  }
}

impl Drop for RunGuard<'_> {
  fn drop(&mut self) {
    if !self.completed {
      self.set(ImportState::Idle);
    }
  }
}
