//! Listing the revisions of one record.

use crate::access::Capability;
use crate::cache::{CacheBucket, cache_key};
use crate::context::RequestContext;
use crate::error::{RevisionError, require};
use crate::gateway::status_from_term;
use crate::service::RevisionService;
use graphrev_model::vocab::{WSF_PERFORMER, WSF_REVISION_STATUS, WSF_REVISION_TIME};
use graphrev_model::{
    LifecycleStatus, ListDetail, RevisionSummary, revisions_graph, sort_summaries,
};
use graphrev_store::StoreError;

impl RevisionService {
    /// Revisions of `record`, most recent first.
    pub fn list(
        &self,
        ctx: &RequestContext,
        record: &str,
        dataset: &str,
        detail: ListDetail,
    ) -> Result<Vec<RevisionSummary>, RevisionError> {
        let record = require(record, "record")?;
        let dataset = require(dataset, "dataset")?;
        self.authorize(ctx, dataset, Capability::Read)?;

        let graph = revisions_graph(dataset);
        let key = cache_key(&[detail.as_str(), &graph, record]);
        if let Some(hit) = self.cache.get(CacheBucket::RevisionLister, &key) {
            match serde_json::from_value::<Vec<RevisionSummary>>(hit) {
                Ok(summaries) => {
                    tracing::debug!(record, detail = detail.as_str(), "revision list cache hit");
                    return Ok(summaries);
                }
                Err(err) => tracing::warn!(record, error = %err, "discarding bad cache entry"),
            }
        }

        let summaries = self.summaries(ctx, &graph, record, detail)?;
        match serde_json::to_value(&summaries) {
            Ok(value) => self.cache.put(CacheBucket::RevisionLister, &key, value),
            Err(err) => tracing::warn!(record, error = %err, "revision list not cached"),
        }
        Ok(summaries)
    }

    pub(crate) fn summaries(
        &self,
        ctx: &RequestContext,
        graph: &str,
        record: &str,
        detail: ListDetail,
    ) -> Result<Vec<RevisionSummary>, RevisionError> {
        let gateway = self.gateway(ctx);
        let mut summaries = Vec::new();
        for revision in gateway.revisions_of(graph, record)? {
            let triples = gateway.describe(graph, &revision)?;
            let object_of = |predicate: &str| {
                triples
                    .iter()
                    .find(|t| t.predicate == predicate)
                    .map(|t| &t.object)
            };

            let time = object_of(WSF_REVISION_TIME).ok_or_else(|| {
                StoreError::Corrupt(format!("revision {revision} has no revisionTime"))
            })?;
            let revision_time = time.lexical().trim().parse::<f64>().map_err(|_| {
                StoreError::Corrupt(format!(
                    "revision {revision} has non-numeric revisionTime {:?}",
                    time.lexical()
                ))
            })?;

            let (performer, revision_status) = match detail {
                ListDetail::Short => (None, None),
                ListDetail::Long => {
                    let performer = object_of(WSF_PERFORMER).map(|t| t.lexical().to_string());
                    let status = match object_of(WSF_REVISION_STATUS) {
                        Some(term) => status_from_term(&revision, term)?,
                        None => LifecycleStatus::Unspecified,
                    };
                    (performer, Some(status))
                }
            };

            summaries.push(RevisionSummary {
                revision_uri: revision,
                revision_time,
                performer,
                revision_status,
            });
        }
        sort_summaries(&mut summaries);
        Ok(summaries)
    }
}
