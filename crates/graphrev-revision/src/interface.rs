//! Versioned output interfaces, selected from a fixed registry by tag.

use crate::error::RevisionError;
use chrono::{DateTime, Utc};
use graphrev_model::{StatementIdScheme, StatementKind};
use std::fmt::Debug;

pub const DEFAULT_INTERFACE_VERSION: &str = "1.0";

/// What an interface may see while naming changeset nodes.
#[derive(Debug, Clone, Copy)]
pub struct ChangeSetRequest<'a> {
    pub left_revision: &'a str,
    pub right_revision: &'a str,
    pub record: &'a str,
    pub created_at: DateTime<Utc>,
}

pub trait RevisionInterface: Send + Sync + Debug {
    fn version(&self) -> &'static str;

    fn statement_scheme(&self) -> StatementIdScheme;

    /// `<right>/<unix seconds>/changeset`
    fn changeset_uri(&self, request: &ChangeSetRequest<'_>) -> String {
        format!(
            "{}/{}/changeset",
            request.right_revision.trim_end_matches('/'),
            request.created_at.timestamp()
        )
    }

    /// Statement ids are keyed to the left revision for additions and removals alike.
    fn statement_id(
        &self,
        kind: StatementKind,
        request: &ChangeSetRequest<'_>,
        predicate: &str,
        value: &str,
    ) -> String {
        self.statement_scheme()
            .statement_id(kind, request.left_revision, predicate, value)
    }
}

/// Wire-compatible interface: MD5 over the concatenated statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInterface;

impl RevisionInterface for DefaultInterface {
    fn version(&self) -> &'static str {
        "1.0"
    }

    fn statement_scheme(&self) -> StatementIdScheme {
        StatementIdScheme::Md5Concat
    }
}

/// Field-separated SHA-256 statement ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashInterface;

impl RevisionInterface for ContentHashInterface {
    fn version(&self) -> &'static str {
        "2.0"
    }

    fn statement_scheme(&self) -> StatementIdScheme {
        StatementIdScheme::Sha256Fields
    }
}

static REGISTRY: [(&str, &dyn RevisionInterface); 2] = [
    ("1.0", &DefaultInterface),
    ("2.0", &ContentHashInterface),
];

pub fn lookup_interface(version: &str) -> Result<&'static dyn RevisionInterface, RevisionError> {
    REGISTRY
        .iter()
        .find(|(tag, _)| *tag == version)
        .map(|(_, interface)| *interface)
        .ok_or_else(|| {
            RevisionError::Validation(format!(
                "unknown interface version {version:?} (supported: {})",
                interface_versions().collect::<Vec<_>>().join(", ")
            ))
        })
}

pub fn interface_versions() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(tag, _)| *tag)
}

pub fn default_interface() -> &'static dyn RevisionInterface {
    &DefaultInterface
}
