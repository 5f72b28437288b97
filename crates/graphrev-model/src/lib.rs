//! # graphrev-model
//!
//! Data model for versioned linked-data records.
//!
//! This crate provides:
//! - `Term` and `Triple` (the RDF building blocks)
//! - `Snapshot` (one subject with per-value reification metadata)
//! - lifecycle states and operation modes for revisions
//! - `ChangeSet` and content-addressed statement identifiers
//!
//! It does not talk to a store. Query plumbing lives in `graphrev-store`;
//! revision operations live in `graphrev-revision`.
//!
//! ## Graph layout
//!
//! ```text
//! <dataset>             live records (current published copies)
//! <dataset>/revisions/  every historical snapshot of those records
//! ```

pub mod changeset;
pub mod revision;
pub mod snapshot;
pub mod statement_id;
pub mod term;
pub mod vocab;

pub use changeset::{ChangeSet, ReifiedStatement};
pub use revision::{
    DeleteMode, LifecycleStatus, ListDetail, ParseValueError, ReadMode, RevisionSummary,
    sort_summaries,
};
pub use snapshot::{PropertyValue, Snapshot};
pub use statement_id::{StatementIdScheme, StatementKind};
pub use term::{Term, Triple};
pub use vocab::revisions_graph;
