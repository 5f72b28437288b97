//! The revision service: collaborators wired around one triple store.

use crate::access::{AccessValidator, AllowAll, Capability};
use crate::cache::{MUTATION_BUCKETS, MemoryCache, NoCache, RevisionCache};
use crate::cascade::RepairLedger;
use crate::config::RevisionConfig;
use crate::context::RequestContext;
use crate::crud::{GraphCrud, RecordCrud};
use crate::error::RevisionError;
use crate::gateway::Gateway;
use crate::interface::{RevisionInterface, default_interface, lookup_interface};
use crate::locks::RecordLocks;
use graphrev_store::TripleStore;
use std::sync::Arc;

/// Read, list, diff, lifecycle, and delete operations over the revisions
/// graphs of one store.
///
/// The operations themselves live in `reader`, `lister`, `diff`,
/// `lifecycle`, and `deleter`.
pub struct RevisionService {
    pub(crate) store: Arc<dyn TripleStore>,
    pub(crate) crud: Arc<dyn RecordCrud>,
    access: Arc<dyn AccessValidator>,
    pub(crate) cache: Arc<dyn RevisionCache>,
    pub(crate) interface: &'static dyn RevisionInterface,
    pub(crate) locks: RecordLocks,
    pub(crate) repairs: RepairLedger,
}

pub struct RevisionServiceBuilder {
    store: Arc<dyn TripleStore>,
    crud: Option<Arc<dyn RecordCrud>>,
    access: Arc<dyn AccessValidator>,
    cache: Arc<dyn RevisionCache>,
    interface: &'static dyn RevisionInterface,
}

impl RevisionServiceBuilder {
    pub fn crud(mut self, crud: Arc<dyn RecordCrud>) -> Self {
        self.crud = Some(crud);
        self
    }

    pub fn access(mut self, access: Arc<dyn AccessValidator>) -> Self {
        self.access = access;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn RevisionCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Select the output interface by version tag.
    pub fn interface_version(mut self, version: &str) -> Result<Self, RevisionError> {
        self.interface = lookup_interface(version)?;
        Ok(self)
    }

    pub fn build(self) -> RevisionService {
        let crud: Arc<dyn RecordCrud> = match self.crud {
            Some(crud) => crud,
            None => Arc::new(GraphCrud::new(self.store.clone())),
        };
        RevisionService {
            store: self.store,
            crud,
            access: self.access,
            cache: self.cache,
            interface: self.interface,
            locks: RecordLocks::new(),
            repairs: RepairLedger::new(),
        }
    }
}

impl RevisionService {
    /// Defaults: live copies through [`GraphCrud`], no access checks,
    /// no cache, interface `1.0`.
    pub fn builder(store: Arc<dyn TripleStore>) -> RevisionServiceBuilder {
        RevisionServiceBuilder {
            store,
            crud: None,
            access: Arc::new(AllowAll),
            cache: Arc::new(NoCache),
            interface: default_interface(),
        }
    }

    pub fn from_config(
        store: Arc<dyn TripleStore>,
        config: &RevisionConfig,
    ) -> Result<Self, RevisionError> {
        let cache: Arc<dyn RevisionCache> = if config.cache {
            Arc::new(MemoryCache::new())
        } else {
            Arc::new(NoCache)
        };
        Ok(Self::builder(store)
            .access(config.access_validator())
            .cache(cache)
            .interface_version(&config.interface_version)?
            .build())
    }

    pub fn interface(&self) -> &'static dyn RevisionInterface {
        self.interface
    }

    /// Records left partially updated by a failed cascade.
    pub fn repairs(&self) -> &RepairLedger {
        &self.repairs
    }

    /// Runs before any store statement of an operation.
    pub(crate) fn authorize(
        &self,
        ctx: &RequestContext,
        dataset: &str,
        capability: Capability,
    ) -> Result<(), RevisionError> {
        if self.access.is_allowed(ctx.actor(), dataset, capability) {
            return Ok(());
        }
        tracing::warn!(actor = ctx.actor(), dataset, %capability, "access denied");
        Err(RevisionError::AccessDenied {
            actor: ctx.actor().to_string(),
            target: dataset.to_string(),
            capability,
        })
    }

    pub(crate) fn gateway<'a>(&'a self, ctx: &'a RequestContext) -> Gateway<'a> {
        Gateway::new(self.store.as_ref(), ctx)
    }

    pub(crate) fn invalidate_after_mutation(&self) {
        for bucket in MUTATION_BUCKETS {
            self.cache.invalidate(bucket);
        }
    }
}
