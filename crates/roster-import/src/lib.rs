//! One-shot import of contacts from a remote JSON endpoint.
//!
//! The pipeline is fetch → plan → insert:
//!
//! 1. a [`ContactSource`] produces the candidate list (fetch errors abort
//!    before anything is written),
//! 2. [`plan_import`] drops every candidate whose phone number is already
//!    known, locally or earlier in the same batch,
//! 3. the survivors go to
//!    [`ContactStore::insert_absent`](roster_core::store::ContactStore::insert_absent),
//!    which re-checks each phone and writes the batch atomically.
//!
//! [`Importer`] wraps the pipeline in a small state machine that refuses
//! overlapping runs.

pub mod candidate;
pub mod error;
pub mod importer;
pub mod merge;
pub mod source;

pub use candidate::ImportCandidate;
pub use error::{FetchError, ImportError};
pub use importer::{ImportReport, ImportState, Importer};
pub use merge::{ImportPlan, plan_import};
pub use source::{ContactSource, HttpSource};
