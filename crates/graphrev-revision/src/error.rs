//! Error taxonomy for revision operations.

use crate::access::Capability;
use graphrev_model::ParseValueError;
use graphrev_store::StoreError;
use serde::{Deserialize, Serialize};

/// Failure reported by an external collaborator (record CRUD).
///
/// Code and message are surfaced unchanged by the operation that called it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct CollaboratorError {
    pub code: String,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&RevisionError> for CollaboratorError {
    fn from(err: &RevisionError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// The inner failure wrapped by a cascade.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CascadeSource {
    #[error(transparent)]
    Operation(Box<RevisionError>),
    #[error(transparent)]
    Collaborator(CollaboratorError),
}

/// Coarse classification of a [`RevisionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    AccessDenied,
    NotFound,
    Store,
    CrossRecord,
    InvalidState,
    CascadeFailure,
    Cancelled,
    DeadlineExceeded,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::AccessDenied => "access_denied",
            Self::NotFound => "not_found",
            Self::Store => "store_error",
            Self::CrossRecord => "cross_record_error",
            Self::InvalidState => "invalid_state",
            Self::CascadeFailure => "cascade_failure",
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RevisionError {
    /// Missing or malformed input.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("access denied: {actor} lacks {capability} on {target}")]
    AccessDenied {
        actor: String,
        target: String,
        capability: Capability,
    },

    #[error("revision not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cannot diff revisions of different records: {left_record} vs {right_record}")]
    CrossRecord {
        left_record: String,
        right_record: String,
    },

    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An inner read or collaborator call failed; display is the inner error.
    #[error("{source}")]
    Cascade {
        step: &'static str,
        source: CascadeSource,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl RevisionError {
    pub(crate) fn cascade(step: &'static str, inner: RevisionError) -> Self {
        Self::Cascade {
            step,
            source: CascadeSource::Operation(Box::new(inner)),
        }
    }

    pub(crate) fn collaborator(step: &'static str, inner: CollaboratorError) -> Self {
        Self::Cascade {
            step,
            source: CascadeSource::Collaborator(inner),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Store,
            Self::CrossRecord { .. } => ErrorKind::CrossRecord,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Cascade { .. } => ErrorKind::CascadeFailure,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
        }
    }

    /// Stable code; a cascade reports the code of the error it wraps.
    pub fn code(&self) -> String {
        match self {
            Self::Cascade {
                source: CascadeSource::Operation(inner),
                ..
            } => inner.code(),
            Self::Cascade {
                source: CascadeSource::Collaborator(inner),
                ..
            } => inner.code.clone(),
            other => other.kind().code().to_string(),
        }
    }

    /// Extra context not meant for end users.
    pub fn debug_detail(&self) -> Option<String> {
        match self {
            Self::Store(err) => Some(format!("{err:?}")),
            Self::Cascade { step, source } => {
                let inner = match source {
                    CascadeSource::Operation(inner) => inner
                        .debug_detail()
                        .unwrap_or_else(|| inner.kind().code().to_string()),
                    CascadeSource::Collaborator(inner) => inner.code.clone(),
                };
                Some(format!("cascade step {step}: {inner}"))
            }
            _ => None,
        }
    }
}

impl From<ParseValueError> for RevisionError {
    fn from(err: ParseValueError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Reject empty or whitespace-only identifiers.
pub(crate) fn require<'a>(value: &'a str, field: &str) -> Result<&'a str, RevisionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RevisionError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}
