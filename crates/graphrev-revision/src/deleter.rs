//! Deleting one revision, or the whole history of a record.

use crate::access::Capability;
use crate::cascade::Cascade;
use crate::context::RequestContext;
use crate::error::{RevisionError, require};
use crate::gateway::Gateway;
use crate::locks::hold;
use crate::service::RevisionService;
use graphrev_model::{DeleteMode, LifecycleStatus, ListDetail, ReadMode, revisions_graph};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub revision: String,
    pub record: String,
    pub mode: DeleteMode,
    /// Every revision removed, the target first.
    pub deleted: Vec<String>,
    /// Published siblings demoted before a hard delete.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub archived: Vec<String>,
}

impl RevisionService {
    /// Remove `revision` (soft) or every revision of its record (hard).
    ///
    /// A published revision is never deleted directly; demote it with
    /// [`RevisionService::set_status`] first.
    ///
    /// Soft mode leaves the record's published revision and live copy
    /// alone: only the target, which is never published, is removed. Hard
    /// mode pulls the live copy and archives the published revision before
    /// purging the history.
    pub fn delete(
        &self,
        ctx: &RequestContext,
        revision: &str,
        dataset: &str,
        mode: DeleteMode,
    ) -> Result<DeleteOutcome, RevisionError> {
        let revision = require(revision, "revision")?;
        let dataset = require(dataset, "dataset")?;
        self.authorize(ctx, dataset, Capability::Delete)?;

        let graph = revisions_graph(dataset);
        let gateway = self.gateway(ctx);
        let record = gateway.require_record(&graph, revision)?;
        let handle = self.locks.handle(&record);
        let _guard = hold(&handle);

        let (deleted, archived) = match mode {
            DeleteMode::Soft => {
                purge_revision(&gateway, &graph, revision)?;
                (vec![revision.to_string()], Vec::new())
            }
            DeleteMode::Hard => self.purge_history(ctx, &graph, dataset, revision, &record)?,
        };

        self.invalidate_after_mutation();
        tracing::info!(
            revision,
            record = %record,
            mode = mode.as_str(),
            deleted = deleted.len(),
            "revision deleted"
        );
        Ok(DeleteOutcome {
            revision: revision.to_string(),
            record,
            mode,
            deleted,
            archived,
        })
    }

    /// Pull the live copy and demote any published sibling, then soft-delete
    /// the target and every other revision of `record`.
    fn purge_history(
        &self,
        ctx: &RequestContext,
        graph: &str,
        dataset: &str,
        revision: &str,
        record: &str,
    ) -> Result<(Vec<String>, Vec<String>), RevisionError> {
        let gateway = self.gateway(ctx);
        // Refuse before anything is demoted.
        ensure_not_published(&gateway, graph, revision)?;

        let published = gateway.published_revisions(graph, record)?;
        let live = match published.first() {
            Some(current) => Some(
                self.load_snapshot(ctx, current, dataset, ReadMode::Record)
                    .map_err(|err| RevisionError::cascade("read-published", err))?,
            ),
            None => None,
        };

        let detached = ctx.detached();
        let undo = Gateway::new(self.store.as_ref(), &detached);
        let crud = self.crud.as_ref();
        let mut cascade = Cascade::new("hard-delete", record, &self.repairs);

        if let Some(snapshot) = live {
            cascade.step("delete-live-record", || {
                crud.delete_record(ctx, record, dataset, DeleteMode::Soft)
                    .map_err(|err| RevisionError::collaborator("delete-live-record", err))
            })?;
            let detached_ctx = &detached;
            cascade.on_rollback("delete-live-record", move || {
                crud.update_record(detached_ctx, &snapshot, dataset, LifecycleStatus::Published)
                    .map_err(|err| RevisionError::collaborator("restore-live-record", err))
            });
        }

        for sibling in &published {
            cascade.step("archive-published", || {
                gateway.set_status(graph, sibling, LifecycleStatus::Archive)
            })?;
            let sibling = sibling.clone();
            cascade.on_rollback("archive-published", move || {
                // Restoring a status onto a purged revision would leave an
                // orphan triple behind.
                if undo.describe(graph, &sibling)?.is_empty() {
                    return Err(RevisionError::InvalidState(format!(
                        "published revision {sibling} was purged before the cascade failed"
                    )));
                }
                undo.set_status(graph, &sibling, LifecycleStatus::Published)
            });
        }

        let mut deleted = Vec::new();
        cascade.step("purge-target", || purge_revision(&gateway, graph, revision))?;
        deleted.push(revision.to_string());

        let siblings = cascade.step("list-history", || {
            self.summaries(ctx, graph, record, ListDetail::Short)
        })?;
        for sibling in siblings {
            if sibling.revision_uri == revision {
                continue;
            }
            cascade.step("purge-sibling", || {
                purge_revision(&gateway, graph, &sibling.revision_uri)
            })?;
            deleted.push(sibling.revision_uri);
        }
        Ok((deleted, published))
    }
}

fn ensure_not_published(
    gateway: &Gateway<'_>,
    graph: &str,
    revision: &str,
) -> Result<(), RevisionError> {
    if gateway.status_of(graph, revision)?.is_published() {
        return Err(RevisionError::InvalidState(format!(
            "revision {revision} is published; change its status before deleting it"
        )));
    }
    Ok(())
}

/// Soft delete: the precondition is checked against the store every time.
fn purge_revision(gateway: &Gateway<'_>, graph: &str, revision: &str) -> Result<usize, RevisionError> {
    ensure_not_published(gateway, graph, revision)?;
    gateway.purge_subject(graph, revision)
}
