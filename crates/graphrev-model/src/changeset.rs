//! ChangeSet: the derived difference between two revisions of one record.

use crate::term::{Term, Triple};
use crate::vocab;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A removed or added `(subject, predicate, object)` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReifiedStatement {
    /// Blank-node label of the `rdf:Statement`.
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl ReifiedStatement {
    fn node(&self) -> String {
        format!("_:{}", self.id)
    }

    fn to_triples(&self) -> [Triple; 4] {
        let node = self.node();
        [
            Triple::new(&node, vocab::RDF_TYPE, Term::iri(vocab::RDF_STATEMENT)),
            Triple::new(&node, vocab::RDF_SUBJECT, Term::from_subject(&self.subject)),
            Triple::new(&node, vocab::RDF_PREDICATE, Term::iri(&self.predicate)),
            Triple::new(&node, vocab::RDF_OBJECT, self.object.clone()),
        ]
    }
}

/// Never persisted; built, returned, and dropped per diff call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub uri: String,
    pub subject_of_change: String,
    pub create_date: DateTime<Utc>,
    pub removals: Vec<ReifiedStatement>,
    pub additions: Vec<ReifiedStatement>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.additions.is_empty()
    }

    /// `createdDate` literal, UTC with second precision.
    pub fn create_date_literal(&self) -> String {
        self.create_date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// RDF rendering: the changeset node linked to every statement node.
    pub fn to_triples(&self) -> Vec<Triple> {
        let mut triples = vec![
            Triple::new(&self.uri, vocab::RDF_TYPE, Term::iri(vocab::CS_CHANGESET)),
            Triple::new(
                &self.uri,
                vocab::CS_SUBJECT_OF_CHANGE,
                Term::iri(&self.subject_of_change),
            ),
            Triple::new(
                &self.uri,
                vocab::CS_CREATED_DATE,
                Term::typed_literal(self.create_date_literal(), vocab::XSD_DATE_TIME),
            ),
        ];
        for (link, statements) in [
            (vocab::CS_REMOVAL, &self.removals),
            (vocab::CS_ADDITION, &self.additions),
        ] {
            for statement in statements {
                triples.push(Triple::new(&self.uri, link, Term::blank(&statement.id)));
                triples.extend(statement.to_triples());
            }
        }
        triples
    }
}
