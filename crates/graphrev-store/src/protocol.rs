//! Store query protocol.
//!
//! The four statement shapes the revision subsystem issues against a graph:
//!
//! ```text
//! select   ?s ?p ?o from <g> where { pattern }
//! insert   into <g> { triples }
//! delete   from <g> { pattern } where { pattern }
//! modify   <g> delete { pattern } insert { triples } where { pattern }
//! ```
//!
//! Each statement is atomic on its own. Nothing spans two statements.

use graphrev_model::{Term, Triple};
use serde::{Deserialize, Serialize};

/// A triple pattern; `None` positions are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Term>,
}

impl TriplePattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().is_none_or(|s| *s == triple.subject)
            && self
                .predicate
                .as_ref()
                .is_none_or(|p| *p == triple.predicate)
            && self.object.as_ref().is_none_or(|o| *o == triple.object)
    }
}

/// Errors raised by a store statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store rejected or failed a statement; carries its diagnostic text.
    #[error("query failed: {0}")]
    Query(String),

    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted substrate: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// A quad store addressed by named graphs.
pub trait TripleStore: Send + Sync {
    /// All triples of `graph` matching `pattern`, in deterministic order.
    fn select(&self, graph: &str, pattern: &TriplePattern) -> Result<Vec<Triple>, StoreError>;

    /// Insert triples; already-present triples are ignored.
    fn insert(&self, graph: &str, triples: &[Triple]) -> Result<(), StoreError>;

    /// Remove every triple matching `pattern`. Returns the removed count.
    fn delete_where(&self, graph: &str, pattern: &TriplePattern) -> Result<usize, StoreError>;

    /// Remove the triples matching `delete` and insert `insert` as one statement.
    ///
    /// Returns the removed count.
    fn modify(
        &self,
        graph: &str,
        delete: &TriplePattern,
        insert: &[Triple],
    ) -> Result<usize, StoreError>;

    /// Names of graphs holding at least one triple.
    fn graphs(&self) -> Result<Vec<String>, StoreError>;
}
