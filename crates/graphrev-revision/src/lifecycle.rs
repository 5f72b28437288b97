//! Lifecycle transitions of a revision.
//!
//! Publishing archives the record's current published revision, marks the
//! target published, and pushes it to the live graph. Leaving `published`
//! pulls the live copy first. Both run as cascades: when a later step fails,
//! earlier steps are undone in reverse order.

use crate::access::Capability;
use crate::cascade::Cascade;
use crate::context::RequestContext;
use crate::error::{RevisionError, require};
use crate::gateway::Gateway;
use crate::locks::hold;
use crate::service::RevisionService;
use graphrev_model::{DeleteMode, LifecycleStatus, ReadMode, revisions_graph};
use serde::Serialize;

/// Result of a successful status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub revision: String,
    pub record: String,
    pub previous: LifecycleStatus,
    pub current: LifecycleStatus,
    /// Revisions demoted from `published` to make room for this one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub archived: Vec<String>,
}

/// Arguments shared by the publish and unpublish cascades.
struct Transition<'a> {
    ctx: &'a RequestContext,
    graph: &'a str,
    dataset: &'a str,
    revision: &'a str,
    record: &'a str,
}

impl RevisionService {
    pub fn set_status(
        &self,
        ctx: &RequestContext,
        revision: &str,
        dataset: &str,
        status: LifecycleStatus,
    ) -> Result<StatusChange, RevisionError> {
        let revision = require(revision, "revision")?;
        let dataset = require(dataset, "dataset")?;
        self.authorize(ctx, dataset, Capability::Update)?;

        let graph = revisions_graph(dataset);
        let gateway = self.gateway(ctx);
        let record = gateway.require_record(&graph, revision)?;
        let handle = self.locks.handle(&record);
        let _guard = hold(&handle);

        let previous = gateway.status_of(&graph, revision)?;
        let transition = Transition {
            ctx,
            graph: &graph,
            dataset,
            revision,
            record: &record,
        };
        let archived = if status.is_published() {
            self.publish(&transition, previous)?
        } else if previous.is_published() {
            self.unpublish(&transition, status)?;
            Vec::new()
        } else {
            gateway.set_status(&graph, revision, status)?;
            Vec::new()
        };

        self.invalidate_after_mutation();
        tracing::info!(
            revision,
            record = %record,
            from = %previous,
            to = %status,
            archived = archived.len(),
            "revision status changed"
        );
        Ok(StatusChange {
            revision: revision.to_string(),
            record,
            previous,
            current: status,
            archived,
        })
    }

    fn publish(
        &self,
        t: &Transition<'_>,
        previous: LifecycleStatus,
    ) -> Result<Vec<String>, RevisionError> {
        let gateway = self.gateway(t.ctx);
        let demote: Vec<String> = gateway
            .published_revisions(t.graph, t.record)?
            .into_iter()
            .filter(|other| other != t.revision)
            .collect();
        // The live copy to put back if the new one cannot be written. A
        // republish keeps its own live copy.
        let live_source = match demote.first() {
            Some(old) => Some(old.as_str()),
            None if previous.is_published() => Some(t.revision),
            None => None,
        };
        let restore = match live_source {
            Some(source) => Some(
                self.load_snapshot(t.ctx, source, t.dataset, ReadMode::Record)
                    .map_err(|err| RevisionError::cascade("read-published", err))?,
            ),
            None => None,
        };

        let detached = t.ctx.detached();
        let undo = Gateway::new(self.store.as_ref(), &detached);
        let crud = self.crud.as_ref();
        let mut cascade = Cascade::new("publish", t.record, &self.repairs);

        for other in &demote {
            cascade.step("archive-previous", || {
                gateway.set_status(t.graph, other, LifecycleStatus::Archive)
            })?;
            let other = other.clone();
            cascade.on_rollback("archive-previous", move || {
                undo.set_status(t.graph, &other, LifecycleStatus::Published)
            });
        }

        cascade.step("publish-revision", || {
            gateway.set_status(t.graph, t.revision, LifecycleStatus::Published)
        })?;
        cascade.on_rollback("publish-revision", move || {
            undo.set_status(t.graph, t.revision, previous)
        });

        // Registered ahead of its step: a failed upsert may leave the live
        // copy half-written.
        let detached_ctx = &detached;
        cascade.on_rollback("update-live-record", move || match restore {
            Some(snapshot) => crud
                .update_record(detached_ctx, &snapshot, t.dataset, LifecycleStatus::Published)
                .map_err(|err| RevisionError::collaborator("restore-live-record", err)),
            None => crud
                .delete_record(detached_ctx, t.record, t.dataset, DeleteMode::Soft)
                .map_err(|err| RevisionError::collaborator("restore-live-record", err)),
        });
        cascade.step("update-live-record", || {
            let snapshot = self
                .load_snapshot(t.ctx, t.revision, t.dataset, ReadMode::Record)
                .map_err(|err| RevisionError::cascade("read-record", err))?;
            crud.update_record(t.ctx, &snapshot, t.dataset, LifecycleStatus::Published)
                .map_err(|err| RevisionError::collaborator("update-live-record", err))
        })?;

        Ok(demote)
    }

    fn unpublish(&self, t: &Transition<'_>, status: LifecycleStatus) -> Result<(), RevisionError> {
        let gateway = self.gateway(t.ctx);
        let snapshot = self
            .load_snapshot(t.ctx, t.revision, t.dataset, ReadMode::Record)
            .map_err(|err| RevisionError::cascade("read-record", err))?;

        let detached = t.ctx.detached();
        let crud = self.crud.as_ref();
        let mut cascade = Cascade::new("unpublish", t.record, &self.repairs);

        cascade.step("delete-live-record", || {
            crud.delete_record(t.ctx, t.record, t.dataset, DeleteMode::Soft)
                .map_err(|err| RevisionError::collaborator("delete-live-record", err))
        })?;
        cascade.on_rollback("delete-live-record", move || {
            crud.update_record(&detached, &snapshot, t.dataset, LifecycleStatus::Published)
                .map_err(|err| RevisionError::collaborator("restore-live-record", err))
        });

        cascade.step("set-status", || gateway.set_status(t.graph, t.revision, status))?;
        Ok(())
    }
}
