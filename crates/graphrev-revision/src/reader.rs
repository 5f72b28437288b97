//! Reading one revision as a snapshot.

use crate::access::Capability;
use crate::cache::{CacheBucket, cache_key};
use crate::context::RequestContext;
use crate::error::{RevisionError, require};
use crate::service::RevisionService;
use graphrev_model::vocab::{
    DCTERMS_IS_PART_OF, RDF_OBJECT, RDF_PREDICATE, REIFICATION_PREDICATES,
    REVISION_META_PREDICATES, WSF_REVISION_URI,
};
use graphrev_model::{ReadMode, Snapshot, Term, Triple, revisions_graph};

impl RevisionService {
    /// Read `revision` from the revisions graph of `dataset`.
    ///
    /// In [`ReadMode::Record`] the revision-only predicates are dropped and
    /// the subject becomes the canonical record URI. Both projections carry
    /// `dcterms:isPartOf <dataset>`.
    pub fn read(
        &self,
        ctx: &RequestContext,
        revision: &str,
        dataset: &str,
        mode: ReadMode,
    ) -> Result<Snapshot, RevisionError> {
        let revision = require(revision, "revision")?;
        let dataset = require(dataset, "dataset")?;
        self.authorize(ctx, dataset, Capability::Read)?;

        let graph = revisions_graph(dataset);
        let key = cache_key(&[mode.as_str(), &graph, revision]);
        if let Some(hit) = self.cache.get(CacheBucket::RevisionRead, &key) {
            match serde_json::from_value::<Snapshot>(hit) {
                Ok(snapshot) => {
                    tracing::debug!(revision, mode = mode.as_str(), "revision read cache hit");
                    return Ok(snapshot);
                }
                Err(err) => tracing::warn!(revision, error = %err, "discarding bad cache entry"),
            }
        }

        let snapshot = self.load_snapshot(ctx, revision, dataset, mode)?;
        match serde_json::to_value(&snapshot) {
            Ok(value) => self.cache.put(CacheBucket::RevisionRead, &key, value),
            Err(err) => tracing::warn!(revision, error = %err, "snapshot not cached"),
        }
        Ok(snapshot)
    }

    /// Uncached, unchecked read used inside cascades that already hold
    /// the record lock.
    pub(crate) fn load_snapshot(
        &self,
        ctx: &RequestContext,
        revision: &str,
        dataset: &str,
        mode: ReadMode,
    ) -> Result<Snapshot, RevisionError> {
        let graph = revisions_graph(dataset);
        let gateway = self.gateway(ctx);

        let triples = gateway.describe(&graph, revision)?;
        if triples.is_empty() {
            return Err(RevisionError::NotFound(revision.to_string()));
        }
        let mut snapshot = Snapshot::from_triples(revision, triples);
        for node in gateway.reification_nodes(&graph, revision)? {
            attach_statement(&mut snapshot, gateway.describe(&graph, &node)?);
        }

        let mut snapshot = match mode {
            ReadMode::Revision => snapshot,
            ReadMode::Record => {
                let record = snapshot
                    .first_value(WSF_REVISION_URI)
                    .and_then(Term::as_iri)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        RevisionError::InvalidState(format!(
                            "revision {revision} has no revisionUri back-reference"
                        ))
                    })?;
                snapshot
                    .without_predicates(&REVISION_META_PREDICATES)
                    .with_subject(record)
            }
        };
        snapshot.push_value(DCTERMS_IS_PART_OF, Term::iri(dataset));
        Ok(snapshot)
    }
}

/// Attach the metadata of one `rdf:Statement` node to the value it describes.
fn attach_statement(snapshot: &mut Snapshot, node: Vec<Triple>) {
    let predicate = node
        .iter()
        .find(|t| t.predicate == RDF_PREDICATE)
        .and_then(|t| t.object.as_iri())
        .map(str::to_string);
    let object = node
        .iter()
        .find(|t| t.predicate == RDF_OBJECT)
        .map(|t| t.object.clone());
    let (Some(predicate), Some(object)) = (predicate, object) else {
        return;
    };
    for meta in node {
        if REIFICATION_PREDICATES.contains(&meta.predicate.as_str()) {
            continue;
        }
        snapshot.attach_reification(&predicate, &object, meta.predicate, meta.object);
    }
}
