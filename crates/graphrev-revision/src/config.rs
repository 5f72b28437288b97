//! `graphrev.toml` loading.

use crate::access::{AccessList, AccessValidator, AllowAll, Capability};
use crate::interface::DEFAULT_INTERFACE_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "graphrev.toml";
pub const ACTOR_ENV: &str = "GRAPHREV_ACTOR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RevisionConfig {
    pub store_path: PathBuf,
    pub actor: String,
    pub interface_version: String,
    pub cache: bool,
    /// actor → dataset (or `*`) → capabilities. Empty grants everything.
    pub access: BTreeMap<String, BTreeMap<String, Vec<Capability>>>,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".graphrev/store.jsonl"),
            actor: "urn:graphrev:local".to_string(),
            interface_version: DEFAULT_INTERFACE_VERSION.to_string(),
            cache: true,
            access: BTreeMap::new(),
        }
    }
}

impl RevisionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Defaults when `path` does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply `GRAPHREV_ACTOR`. A blank value is ignored.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(actor) = std::env::var(ACTOR_ENV) {
            self.apply_actor_override(&actor);
        }
        self
    }

    fn apply_actor_override(&mut self, actor: &str) {
        let actor = actor.trim();
        if actor.is_empty() {
            tracing::warn!(var = ACTOR_ENV, "ignoring blank actor override");
            return;
        }
        self.actor = actor.to_string();
    }

    pub fn access_validator(&self) -> Arc<dyn AccessValidator> {
        if self.access.is_empty() {
            return Arc::new(AllowAll);
        }
        let mut list = AccessList::new();
        for (actor, datasets) in &self.access {
            for (dataset, capabilities) in datasets {
                list = list.grant(actor, dataset, capabilities.iter().copied());
            }
        }
        Arc::new(list)
    }
}
