//! # graphrev-store
//!
//! Storage layer for linked-data graphs.
//!
//! This crate provides:
//! - the `TripleStore` query protocol (select / insert / delete / modify)
//! - `MemoryTripleStore` (deterministic in-memory quad store)
//! - JSONL read/write (portable persistence)
//! - lock-scoped atomic mutation of a JSONL-backed store
//!
//! It does not know about revisions. That lives in `graphrev-revision`.
//!
//! ## Data model
//!
//! ```text
//! JSONL (on disk, one line per quad)
//!     ↕  load / save
//! MemoryTripleStore (graph → ordered triple set)
//! ```

pub mod atomic_store;
pub mod jsonl;
pub mod memory;
pub mod protocol;

pub use atomic_store::{AtomicStoreMutationError, mutate_store_jsonl, store_lock_path};
pub use jsonl::{Quad, read_quads, read_quads_from_path, write_quads, write_quads_to_path};
pub use memory::MemoryTripleStore;
pub use protocol::{StoreError, TriplePattern, TripleStore};
