//! Live-record collaborator.
//!
//! Lifecycle changes push a record snapshot into (or pull it out of) the
//! dataset's primary graph through [`RecordCrud`]. The service never writes
//! the live graph itself.

use crate::context::RequestContext;
use crate::error::{CollaboratorError, RevisionError};
use crate::gateway::Gateway;
use graphrev_model::{DeleteMode, LifecycleStatus, Snapshot};
use graphrev_store::TripleStore;
use std::sync::Arc;

pub trait RecordCrud: Send + Sync {
    /// Upsert the live copy of `snapshot.subject` in `dataset`.
    fn update_record(
        &self,
        ctx: &RequestContext,
        snapshot: &Snapshot,
        dataset: &str,
        lifecycle: LifecycleStatus,
    ) -> Result<(), CollaboratorError>;

    /// Remove the live copy of `record` from `dataset`.
    fn delete_record(
        &self,
        ctx: &RequestContext,
        record: &str,
        dataset: &str,
        mode: DeleteMode,
    ) -> Result<(), CollaboratorError>;
}

/// Keeps the live copy in the dataset graph of the same store.
pub struct GraphCrud {
    store: Arc<dyn TripleStore>,
}

impl GraphCrud {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self { store }
    }

    fn upsert(
        &self,
        ctx: &RequestContext,
        snapshot: &Snapshot,
        dataset: &str,
    ) -> Result<(), RevisionError> {
        let gateway = Gateway::new(self.store.as_ref(), ctx);
        gateway.purge_subject(dataset, &snapshot.subject)?;
        let mut triples = snapshot.to_triples();
        triples.extend(snapshot.reification_triples());
        ctx.checkpoint()?;
        self.store.insert(dataset, &triples)?;
        Ok(())
    }
}

impl RecordCrud for GraphCrud {
    fn update_record(
        &self,
        ctx: &RequestContext,
        snapshot: &Snapshot,
        dataset: &str,
        lifecycle: LifecycleStatus,
    ) -> Result<(), CollaboratorError> {
        // Only the published copy is live; other flags leave the graph alone.
        if !lifecycle.is_published() {
            tracing::debug!(record = %snapshot.subject, %lifecycle, "live copy untouched");
            return Ok(());
        }
        self.upsert(ctx, snapshot, dataset)
            .map_err(|err| CollaboratorError::from(&err))
    }

    fn delete_record(
        &self,
        ctx: &RequestContext,
        record: &str,
        dataset: &str,
        mode: DeleteMode,
    ) -> Result<(), CollaboratorError> {
        let removed = Gateway::new(self.store.as_ref(), ctx)
            .purge_subject(dataset, record)
            .map_err(|err| CollaboratorError::from(&err))?;
        tracing::debug!(record, dataset, mode = mode.as_str(), removed, "live copy removed");
        Ok(())
    }
}
