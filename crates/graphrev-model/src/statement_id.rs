//! Content-addressed identifiers for reified statements.
//!
//! Re-running a diff over unchanged inputs yields identical identifiers.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Role of a reified statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Removal,
    Addition,
    Reification,
}

impl StatementKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Removal => "removal",
            Self::Addition => "addition",
            Self::Reification => "reification",
        }
    }
}

/// How statement identifiers are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementIdScheme {
    /// `prefix-hex(md5(subject + predicate + value))`, wire compatible with
    /// existing changeset consumers.
    Md5Concat,
    /// `prefix-hex(sha256(...))` over name-tagged fields, so distinct
    /// (subject, predicate, value) splits never collide.
    Sha256Fields,
}

impl StatementIdScheme {
    pub fn statement_id(
        self,
        kind: StatementKind,
        subject: &str,
        predicate: &str,
        value: &str,
    ) -> String {
        let digest = match self {
            Self::Md5Concat => {
                let mut hasher = Md5::new();
                hasher.update(subject.as_bytes());
                hasher.update(predicate.as_bytes());
                hasher.update(value.as_bytes());
                format!("{:x}", hasher.finalize())
            }
            Self::Sha256Fields => FieldHasher::new()
                .field("subject", subject)
                .field("predicate", predicate)
                .field("value", value)
                .finish(),
        };
        format!("{}-{digest}", kind.prefix())
    }
}

/// Feeds `name:value` fields in a stable order into SHA-256.
struct FieldHasher {
    hasher: Sha256,
}

impl FieldHasher {
    fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    fn field(mut self, name: &str, value: &str) -> Self {
        self.hasher.update(name.as_bytes());
        self.hasher.update(b":");
        self.hasher.update((value.len() as u64).to_be_bytes());
        self.hasher.update(value.as_bytes());
        self.hasher.update(b"\n");
        self
    }

    fn finish(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}
