//! RDF terms and triples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RDF term in object position.
///
/// Ordering is total so triple sets stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    Iri {
        value: String,
    },
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    Blank {
        value: String,
    },
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri {
            value: value.into(),
        }
    }

    /// Plain literal without datatype or language tag.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            lang: None,
        }
    }

    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
            lang: Some(lang.into()),
        }
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank {
            value: label.into(),
        }
    }

    /// Build the object term for a subject-position string (`_:` prefix marks a blank node).
    pub fn from_subject(subject: &str) -> Self {
        match subject.strip_prefix("_:") {
            Some(label) => Self::blank(label),
            None => Self::iri(subject),
        }
    }

    /// The IRI string or literal lexical form.
    pub fn lexical(&self) -> &str {
        match self {
            Self::Iri { value } | Self::Literal { value, .. } | Self::Blank { value } => value,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri { value } => Some(value),
            _ => None,
        }
    }

    /// Resource references (IRIs and blank nodes) as opposed to literals.
    pub fn is_resource(&self) -> bool {
        !matches!(self, Self::Literal { .. })
    }

    /// Key used when two values are compared across revisions.
    ///
    /// Resources compare by IRI string, literals by lexical string;
    /// datatype and language tags do not participate.
    pub fn comparison_key(&self) -> (bool, &str) {
        (self.is_resource(), self.lexical())
    }

    /// Subject-position rendering (`_:label` for blank nodes).
    pub fn to_subject(&self) -> String {
        match self {
            Self::Blank { value } => format!("_:{value}"),
            other => other.lexical().to_string(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri { value } => write!(f, "<{value}>"),
            Self::Blank { value } => write!(f, "_:{value}"),
            Self::Literal {
                value,
                datatype,
                lang,
            } => {
                write!(f, "{value:?}")?;
                if let Some(lang) = lang {
                    write!(f, "@{lang}")?;
                } else if let Some(datatype) = datatype {
                    write!(f, "^^<{datatype}>")?;
                }
                Ok(())
            }
        }
    }
}

/// One triple. Subjects are IRIs or `_:`-prefixed blank labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = Term::from_subject(&self.subject);
        write!(f, "{subject} <{}> {} .", self.predicate, self.object)
    }
}
