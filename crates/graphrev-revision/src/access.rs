//! Capability checks consulted before any store statement.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Dataset key matching every dataset in an [`AccessList`].
pub const ANY_DATASET: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Read,
    Update,
    Delete,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Yes/no gate: may `actor` exercise `capability` on `dataset`?
pub trait AccessValidator: Send + Sync {
    fn is_allowed(&self, actor: &str, dataset: &str, capability: Capability) -> bool;
}

/// Grants everything. Used when no access table is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessValidator for AllowAll {
    fn is_allowed(&self, _actor: &str, _dataset: &str, _capability: Capability) -> bool {
        true
    }
}

/// Static actor → dataset → capabilities table.
#[derive(Debug, Clone, Default)]
pub struct AccessList {
    grants: BTreeMap<String, BTreeMap<String, BTreeSet<Capability>>>,
}

impl AccessList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(
        mut self,
        actor: impl Into<String>,
        dataset: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        self.grants
            .entry(actor.into())
            .or_default()
            .entry(dataset.into())
            .or_default()
            .extend(capabilities);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl AccessValidator for AccessList {
    fn is_allowed(&self, actor: &str, dataset: &str, capability: Capability) -> bool {
        let Some(datasets) = self.grants.get(actor) else {
            return false;
        };
        [dataset, ANY_DATASET]
            .iter()
            .filter_map(|key| datasets.get(*key))
            .any(|caps| caps.contains(&capability))
    }
}
