//! Read-through cache contract and named invalidation buckets.
//!
//! Storage and eviction belong to the cache implementation. This crate only
//! reads through it and invalidates buckets after mutations.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CacheBucket {
    RevisionRead,
    RevisionLister,
    Search,
    Sparql,
    CrudRead,
}

impl CacheBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RevisionRead => "revision-read",
            Self::RevisionLister => "revision-lister",
            Self::Search => "search",
            Self::Sparql => "sparql",
            Self::CrudRead => "crud-read",
        }
    }
}

/// Buckets invalidated after a successful lifecycle change or delete.
pub const MUTATION_BUCKETS: [CacheBucket; 5] = [
    CacheBucket::RevisionRead,
    CacheBucket::RevisionLister,
    CacheBucket::Search,
    CacheBucket::Sparql,
    CacheBucket::CrudRead,
];

pub trait RevisionCache: Send + Sync {
    fn get(&self, bucket: CacheBucket, key: &str) -> Option<Value>;

    fn put(&self, bucket: CacheBucket, key: &str, value: Value);

    /// Fire-and-forget; a failed invalidation is not an operation error.
    fn invalidate(&self, bucket: CacheBucket);
}

/// Join key parts with a separator that cannot appear in an IRI.
pub fn cache_key(parts: &[&str]) -> String {
    parts.join("\u{1f}")
}

/// Caches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl RevisionCache for NoCache {
    fn get(&self, _bucket: CacheBucket, _key: &str) -> Option<Value> {
        None
    }

    fn put(&self, _bucket: CacheBucket, _key: &str, _value: Value) {}

    fn invalidate(&self, _bucket: CacheBucket) {}
}

/// Unbounded in-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<BTreeMap<(CacheBucket, String), Value>>,
    invalidations: Mutex<BTreeMap<CacheBucket, usize>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times `bucket` has been invalidated.
    pub fn invalidation_count(&self, bucket: CacheBucket) -> usize {
        self.invalidations
            .lock()
            .map(|counts| counts.get(&bucket).copied().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl RevisionCache for MemoryCache {
    fn get(&self, bucket: CacheBucket, key: &str) -> Option<Value> {
        let entries = self.entries.lock().ok()?;
        entries.get(&(bucket, key.to_string())).cloned()
    }

    fn put(&self, bucket: CacheBucket, key: &str, value: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert((bucket, key.to_string()), value);
        }
    }

    fn invalidate(&self, bucket: CacheBucket) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|(entry_bucket, _), _| *entry_bucket != bucket);
        }
        if let Ok(mut counts) = self.invalidations.lock() {
            *counts.entry(bucket).or_default() += 1;
        }
    }
}
