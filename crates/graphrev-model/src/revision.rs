//! Revision lifecycle states, operation modes, and list summaries.

use crate::vocab;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A string that does not name any value of the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Visibility state of one revision. `Published` is the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Published,
    Archive,
    Experimental,
    PreRelease,
    Staging,
    Harvesting,
    Unspecified,
}

impl LifecycleStatus {
    pub const ALL: [LifecycleStatus; 7] = [
        Self::Published,
        Self::Archive,
        Self::Experimental,
        Self::PreRelease,
        Self::Staging,
        Self::Harvesting,
        Self::Unspecified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Archive => "archive",
            Self::Experimental => "experimental",
            Self::PreRelease => "pre_release",
            Self::Staging => "staging",
            Self::Harvesting => "harvesting",
            Self::Unspecified => "unspecified",
        }
    }

    /// IRI stored as the object of `wsf:revisionStatus`.
    pub fn iri(self) -> &'static str {
        match self {
            Self::Published => vocab::WSF_PUBLISHED,
            Self::Archive => vocab::WSF_ARCHIVE,
            Self::Experimental => vocab::WSF_EXPERIMENTAL,
            Self::PreRelease => vocab::WSF_PRE_RELEASE,
            Self::Staging => vocab::WSF_STAGING,
            Self::Harvesting => vocab::WSF_HARVESTING,
            Self::Unspecified => vocab::WSF_UNSPECIFIED,
        }
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.iri() == iri)
    }

    pub fn is_published(self) -> bool {
        self == Self::Published
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LifecycleStatus {
    type Err = ParseValueError;

    /// Accepts the short name or the full status IRI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(status) = Self::from_iri(s) {
            return Ok(status);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseValueError::new("lifecycle status", s))
    }
}

/// Projection applied when a revision is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadMode {
    /// All triples as stored, under the revision URI.
    Revision,
    /// Revision-only predicates stripped, subject rewritten to the record URI.
    Record,
}

impl ReadMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revision => "revision",
            Self::Record => "record",
        }
    }
}

impl std::str::FromStr for ReadMode {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revision" => Ok(Self::Revision),
            "record" => Ok(Self::Record),
            _ => Err(ParseValueError::new("read mode", s)),
        }
    }
}

/// Amount of detail returned per listed revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListDetail {
    Short,
    Long,
}

impl ListDetail {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl std::str::FromStr for ListDetail {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            _ => Err(ParseValueError::new("list detail", s)),
        }
    }
}

/// Revision deletion scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// One revision; sibling history is preserved.
    Soft,
    /// The whole history of the record.
    Hard,
}

impl DeleteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Hard => "hard",
        }
    }
}

impl std::str::FromStr for DeleteMode {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft" => Ok(Self::Soft),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseValueError::new("delete mode", s)),
        }
    }
}

/// One row of a revision listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSummary {
    pub revision_uri: String,
    pub revision_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_status: Option<LifecycleStatus>,
}

/// Most recent first; equal times fall back to ascending URI order.
pub fn sort_summaries(summaries: &mut [RevisionSummary]) {
    summaries.sort_by(|left, right| {
        right
            .revision_time
            .total_cmp(&left.revision_time)
            .then_with(|| left.revision_uri.cmp(&right.revision_uri))
    });
}
