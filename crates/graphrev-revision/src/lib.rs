//! # graphrev-revision
//!
//! Versioning services for linked-data records.
//!
//! Every record in a dataset `D` keeps its history in the revisions graph
//! `D/revisions/`. [`RevisionService`] reads, lists, compares, transitions,
//! and deletes those revisions:
//!
//! - `read`: one revision, projected as stored or as the record it describes
//! - `list`: every revision of a record, most recent first
//! - `diff`: the changeset between two revisions of the same record
//! - `set_status`: lifecycle transitions, keeping one published revision per
//!   record and the live copy in `D` in step with it
//! - `delete`: one revision, or the whole history of a record
//!
//! Lifecycle changes and deletes take a per-record lock and run their
//! multi-step work as compensating cascades. Records a cascade could not
//! restore are kept in the [`RepairLedger`].

pub mod access;
pub mod cache;
pub mod cascade;
pub mod config;
pub mod context;
pub mod crud;
pub mod error;
pub mod interface;
pub mod locks;

mod deleter;
mod diff;
mod gateway;
mod lifecycle;
mod lister;
mod reader;
mod service;

pub use access::{ANY_DATASET, AccessList, AccessValidator, AllowAll, Capability};
pub use cache::{CacheBucket, MUTATION_BUCKETS, MemoryCache, NoCache, RevisionCache, cache_key};
pub use cascade::{RepairEntry, RepairLedger};
pub use config::{ACTOR_ENV, CONFIG_FILE_NAME, ConfigError, RevisionConfig};
pub use context::{CancelToken, RequestContext};
pub use crud::{GraphCrud, RecordCrud};
pub use deleter::DeleteOutcome;
pub use error::{CascadeSource, CollaboratorError, ErrorKind, RevisionError};
pub use interface::{
    ChangeSetRequest, ContentHashInterface, DEFAULT_INTERFACE_VERSION, DefaultInterface,
    RevisionInterface, default_interface, interface_versions, lookup_interface,
};
pub use lifecycle::StatusChange;
pub use locks::RecordLocks;
pub use service::{RevisionService, RevisionServiceBuilder};
