//! Store access scoped to one request.
//!
//! Every statement passes the request checkpoint first. Revision-shaped
//! lookups (status, record back-reference, reification nodes) live here so
//! the operations read as business rules.

use crate::context::RequestContext;
use crate::error::RevisionError;
use graphrev_model::{LifecycleStatus, Term, Triple, vocab};
use graphrev_store::{StoreError, TriplePattern, TripleStore};

#[derive(Clone, Copy)]
pub(crate) struct Gateway<'a> {
    store: &'a dyn TripleStore,
    ctx: &'a RequestContext,
}

impl<'a> Gateway<'a> {
    pub(crate) fn new(store: &'a dyn TripleStore, ctx: &'a RequestContext) -> Self {
        Self { store, ctx }
    }

    pub(crate) fn select(
        &self,
        graph: &str,
        pattern: &TriplePattern,
    ) -> Result<Vec<Triple>, RevisionError> {
        self.ctx.checkpoint()?;
        Ok(self.store.select(graph, pattern)?)
    }

    pub(crate) fn delete_where(
        &self,
        graph: &str,
        pattern: &TriplePattern,
    ) -> Result<usize, RevisionError> {
        self.ctx.checkpoint()?;
        Ok(self.store.delete_where(graph, pattern)?)
    }

    pub(crate) fn modify(
        &self,
        graph: &str,
        delete: &TriplePattern,
        insert: &[Triple],
    ) -> Result<usize, RevisionError> {
        self.ctx.checkpoint()?;
        Ok(self.store.modify(graph, delete, insert)?)
    }

    /// All triples whose subject is `subject`.
    pub(crate) fn describe(&self, graph: &str, subject: &str) -> Result<Vec<Triple>, RevisionError> {
        self.select(graph, &TriplePattern::subject(subject))
    }

    /// Subjects of `rdf:Statement` nodes whose `rdf:subject` is `subject`.
    pub(crate) fn reification_nodes(
        &self,
        graph: &str,
        subject: &str,
    ) -> Result<Vec<String>, RevisionError> {
        let pattern = TriplePattern::any()
            .with_predicate(vocab::RDF_SUBJECT)
            .with_object(Term::from_subject(subject));
        let mut nodes: Vec<String> = self
            .select(graph, &pattern)?
            .into_iter()
            .map(|t| t.subject)
            .collect();
        nodes.dedup();
        Ok(nodes)
    }

    /// Canonical record URI of `revision`, if the revision exists.
    pub(crate) fn record_of(
        &self,
        graph: &str,
        revision: &str,
    ) -> Result<Option<String>, RevisionError> {
        let pattern = TriplePattern::subject(revision).with_predicate(vocab::WSF_REVISION_URI);
        Ok(self
            .select(graph, &pattern)?
            .into_iter()
            .find_map(|t| t.object.as_iri().map(str::to_string)))
    }

    /// Resolve the record of an existing revision.
    ///
    /// `NotFound` when the revision has no triples at all.
    pub(crate) fn require_record(&self, graph: &str, revision: &str) -> Result<String, RevisionError> {
        if let Some(record) = self.record_of(graph, revision)? {
            return Ok(record);
        }
        if self.describe(graph, revision)?.is_empty() {
            return Err(RevisionError::NotFound(revision.to_string()));
        }
        Err(RevisionError::InvalidState(format!(
            "revision {revision} has no revisionUri back-reference"
        )))
    }

    /// Stored status of `revision`; a revision without one is `Unspecified`.
    pub(crate) fn status_of(
        &self,
        graph: &str,
        revision: &str,
    ) -> Result<LifecycleStatus, RevisionError> {
        let pattern = TriplePattern::subject(revision).with_predicate(vocab::WSF_REVISION_STATUS);
        let rows = self.select(graph, &pattern)?;
        match rows.first() {
            None => Ok(LifecycleStatus::Unspecified),
            Some(row) => status_from_term(revision, &row.object),
        }
    }

    /// URIs of every revision of `record`.
    pub(crate) fn revisions_of(
        &self,
        graph: &str,
        record: &str,
    ) -> Result<Vec<String>, RevisionError> {
        let pattern = TriplePattern::any()
            .with_predicate(vocab::WSF_REVISION_URI)
            .with_object(Term::iri(record));
        Ok(self
            .select(graph, &pattern)?
            .into_iter()
            .map(|t| t.subject)
            .collect())
    }

    /// Revisions of `record` currently marked published.
    pub(crate) fn published_revisions(
        &self,
        graph: &str,
        record: &str,
    ) -> Result<Vec<String>, RevisionError> {
        let mut published = Vec::new();
        for revision in self.revisions_of(graph, record)? {
            if self.status_of(graph, &revision)?.is_published() {
                published.push(revision);
            }
        }
        Ok(published)
    }

    /// Replace the status triple of `revision` in one statement.
    pub(crate) fn set_status(
        &self,
        graph: &str,
        revision: &str,
        status: LifecycleStatus,
    ) -> Result<(), RevisionError> {
        let delete = TriplePattern::subject(revision).with_predicate(vocab::WSF_REVISION_STATUS);
        let insert = Triple::new(revision, vocab::WSF_REVISION_STATUS, Term::iri(status.iri()));
        self.modify(graph, &delete, &[insert])?;
        Ok(())
    }

    /// Remove `subject` and every reification statement about it.
    pub(crate) fn purge_subject(&self, graph: &str, subject: &str) -> Result<usize, RevisionError> {
        let mut removed = 0;
        for node in self.reification_nodes(graph, subject)? {
            removed += self.delete_where(graph, &TriplePattern::subject(node))?;
        }
        removed += self.delete_where(graph, &TriplePattern::subject(subject))?;
        Ok(removed)
    }
}

/// Decode a stored status value (full IRI or short name).
pub(crate) fn status_from_term(revision: &str, term: &Term) -> Result<LifecycleStatus, RevisionError> {
    let value = term.lexical();
    LifecycleStatus::from_iri(value)
        .or_else(|| value.parse().ok())
        .ok_or_else(|| {
            StoreError::Corrupt(format!("revision {revision} has unknown status {value:?}")).into()
        })
}
