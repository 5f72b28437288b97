//! Snapshot: one subject with its property values and per-value reification.

use crate::statement_id::{StatementIdScheme, StatementKind};
use crate::term::{Term, Triple};
use crate::vocab;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value of one property, with provenance statements keyed to that
/// exact (property, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub value: Term,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reification: BTreeMap<String, Vec<Term>>,
}

impl PropertyValue {
    pub fn new(value: Term) -> Self {
        Self {
            value,
            reification: BTreeMap::new(),
        }
    }
}

/// The description of one subject as read from a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub subject: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<PropertyValue>>,
}

impl Snapshot {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Collect the triples of `subject`; triples about other subjects are skipped.
    pub fn from_triples(subject: &str, triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut snapshot = Self::new(subject);
        for triple in triples {
            if triple.subject == subject {
                snapshot.push_value(triple.predicate, triple.object);
            }
        }
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Add a value unless the same term is already present.
    ///
    /// Returns whether the value was added.
    pub fn push_value(&mut self, predicate: impl Into<String>, value: Term) -> bool {
        let values = self.properties.entry(predicate.into()).or_default();
        if values.iter().any(|existing| existing.value == value) {
            return false;
        }
        values.push(PropertyValue::new(value));
        true
    }

    pub fn values(&self, predicate: &str) -> &[PropertyValue] {
        self.properties
            .get(predicate)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn first_value(&self, predicate: &str) -> Option<&Term> {
        self.values(predicate).first().map(|v| &v.value)
    }

    pub fn has_value(&self, predicate: &str, value: &Term) -> bool {
        self.values(predicate).iter().any(|v| &v.value == value)
    }

    /// Attach one provenance statement to the value `(predicate, value)`.
    ///
    /// Returns `false` when no such value exists on the snapshot.
    pub fn attach_reification(
        &mut self,
        predicate: &str,
        value: &Term,
        meta_predicate: impl Into<String>,
        meta_value: Term,
    ) -> bool {
        let Some(target) = self
            .properties
            .get_mut(predicate)
            .and_then(|values| values.iter_mut().find(|v| &v.value == value))
        else {
            return false;
        };
        let metas = target.reification.entry(meta_predicate.into()).or_default();
        if !metas.contains(&meta_value) {
            metas.push(meta_value);
        }
        true
    }

    /// Copy of the snapshot without the given predicates.
    pub fn without_predicates(&self, predicates: &[&str]) -> Self {
        let properties = self
            .properties
            .iter()
            .filter(|(predicate, _)| !predicates.contains(&predicate.as_str()))
            .map(|(predicate, values)| (predicate.clone(), values.clone()))
            .collect();
        Self {
            subject: self.subject.clone(),
            properties,
        }
    }

    /// Same content under another subject URI.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Iterate `(predicate, value)` pairs in deterministic order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties
            .iter()
            .flat_map(|(predicate, values)| values.iter().map(move |v| (predicate.as_str(), v)))
    }

    /// Plain triples of the subject, without reification statements.
    pub fn to_triples(&self) -> Vec<Triple> {
        self.pairs()
            .map(|(predicate, value)| Triple::new(&self.subject, predicate, value.value.clone()))
            .collect()
    }

    /// `rdf:Statement` nodes carrying the attached reification metadata.
    ///
    /// Node labels are derived from the statement content, so writing the
    /// same snapshot twice produces the same nodes.
    pub fn reification_triples(&self) -> Vec<Triple> {
        let mut triples = Vec::new();
        for (predicate, value) in self.pairs() {
            if value.reification.is_empty() {
                continue;
            }
            let label = StatementIdScheme::Sha256Fields.statement_id(
                StatementKind::Reification,
                &self.subject,
                predicate,
                value.value.lexical(),
            );
            let node = format!("_:{label}");
            triples.push(Triple::new(
                &node,
                vocab::RDF_TYPE,
                Term::iri(vocab::RDF_STATEMENT),
            ));
            triples.push(Triple::new(
                &node,
                vocab::RDF_SUBJECT,
                Term::from_subject(&self.subject),
            ));
            triples.push(Triple::new(&node, vocab::RDF_PREDICATE, Term::iri(predicate)));
            triples.push(Triple::new(&node, vocab::RDF_OBJECT, value.value.clone()));
            for (meta_predicate, metas) in &value.reification {
                for meta in metas {
                    triples.push(Triple::new(&node, meta_predicate, meta.clone()));
                }
            }
        }
        triples
    }
}
