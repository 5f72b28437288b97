//! Changesets between two revisions of the same record.

use crate::access::Capability;
use crate::context::RequestContext;
use crate::error::{RevisionError, require};
use crate::interface::ChangeSetRequest;
use crate::service::RevisionService;
use chrono::{SubsecRound, Utc};
use graphrev_model::vocab::DIFF_EXCLUDED_PREDICATES;
use graphrev_model::{ChangeSet, ReadMode, ReifiedStatement, Snapshot, StatementKind, Term};
use std::collections::BTreeMap;

/// `(predicate, is_resource, lexical)`: values compare by IRI or by
/// literal string, never by datatype or language tag.
type PairKey<'a> = (&'a str, bool, &'a str);

impl RevisionService {
    /// What changed from `left` to `right`.
    ///
    /// Both revisions are read in record mode; reader failures surface as
    /// cascade errors carrying the reader's code.
    pub fn diff(
        &self,
        ctx: &RequestContext,
        left: &str,
        right: &str,
        dataset: &str,
    ) -> Result<ChangeSet, RevisionError> {
        let left = require(left, "left revision")?;
        let right = require(right, "right revision")?;
        let dataset = require(dataset, "dataset")?;
        self.authorize(ctx, dataset, Capability::Read)?;

        let left_snapshot = self
            .read(ctx, left, dataset, ReadMode::Record)
            .map_err(|err| RevisionError::cascade("read-left", err))?;
        let right_snapshot = self
            .read(ctx, right, dataset, ReadMode::Record)
            .map_err(|err| RevisionError::cascade("read-right", err))?;

        if left_snapshot.subject != right_snapshot.subject {
            return Err(RevisionError::CrossRecord {
                left_record: left_snapshot.subject,
                right_record: right_snapshot.subject,
            });
        }
        let record = left_snapshot.subject.as_str();

        let request = ChangeSetRequest {
            left_revision: left,
            right_revision: right,
            record,
            created_at: Utc::now().trunc_subsecs(0),
        };
        let left_pairs = comparable_pairs(&left_snapshot);
        let right_pairs = comparable_pairs(&right_snapshot);

        let statements = |kind: StatementKind,
                          from: &BTreeMap<PairKey<'_>, &Term>,
                          against: &BTreeMap<PairKey<'_>, &Term>| {
            from.iter()
                .filter(|(key, _)| !against.contains_key(*key))
                .map(|((predicate, _, lexical), value)| ReifiedStatement {
                    id: self
                        .interface
                        .statement_id(kind, &request, predicate, lexical),
                    subject: record.to_string(),
                    predicate: predicate.to_string(),
                    object: (*value).clone(),
                })
                .collect::<Vec<_>>()
        };
        let removals = statements(StatementKind::Removal, &left_pairs, &right_pairs);
        let additions = statements(StatementKind::Addition, &right_pairs, &left_pairs);

        tracing::debug!(
            left,
            right,
            removals = removals.len(),
            additions = additions.len(),
            "revisions compared"
        );
        Ok(ChangeSet {
            uri: self.interface.changeset_uri(&request),
            subject_of_change: record.to_string(),
            create_date: request.created_at,
            removals,
            additions,
        })
    }
}

fn comparable_pairs(snapshot: &Snapshot) -> BTreeMap<PairKey<'_>, &Term> {
    snapshot
        .pairs()
        .filter(|(predicate, _)| !DIFF_EXCLUDED_PREDICATES.contains(predicate))
        .map(|(predicate, value)| {
            let (is_resource, lexical) = value.value.comparison_key();
            ((predicate, is_resource, lexical), &value.value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphrev_model::{StatementIdScheme, Triple, vocab};
    use graphrev_store::{MemoryTripleStore, TripleStore};
    use std::sync::Arc;

    const DATASET: &str = "http://ex.org/ds/";
    const GRAPH: &str = "http://ex.org/ds/revisions/";

    fn revision(store: &MemoryTripleStore, uri: &str, record: &str, props: &[(&str, Term)]) {
        let mut triples = vec![
            Triple::new(uri, vocab::WSF_REVISION_URI, Term::iri(record)),
            Triple::new(uri, vocab::WSF_REVISION_TIME, Term::literal("1")),
            Triple::new(uri, vocab::RDF_TYPE, Term::iri("http://ex.org/Person")),
        ];
        for (predicate, value) in props {
            triples.push(Triple::new(uri, *predicate, value.clone()));
        }
        store.insert(GRAPH, &triples).expect("seed");
    }

    fn fixture() -> RevisionService {
        let store = Arc::new(MemoryTripleStore::new());
        revision(
            &store,
            "http://ex.org/rev/1",
            "http://ex.org/r1",
            &[("http://ex.org/name", Term::literal("Alice"))],
        );
        revision(
            &store,
            "http://ex.org/rev/2",
            "http://ex.org/r1",
            &[
                ("http://ex.org/name", Term::literal("Alice")),
                ("http://ex.org/age", Term::literal("30")),
                (vocab::IRON_PREF_LABEL, Term::literal("Alice A.")),
            ],
        );
        revision(
            &store,
            "http://ex.org/rev/x",
            "http://ex.org/r2",
            &[("http://ex.org/name", Term::literal("Bob"))],
        );
        RevisionService::builder(store).build()
    }

    #[test]
    fn addition_is_reported_against_the_record() {
        let service = fixture();
        let changes = service
            .diff(
                &RequestContext::new("ann"),
                "http://ex.org/rev/1",
                "http://ex.org/rev/2",
                DATASET,
            )
            .expect("diff");

        assert!(changes.removals.is_empty());
        assert_eq!(changes.additions.len(), 1);
        let added = &changes.additions[0];
        assert_eq!(added.subject, "http://ex.org/r1");
        assert_eq!(added.predicate, "http://ex.org/age");
        assert_eq!(added.object, Term::literal("30"));
        assert_eq!(
            added.id,
            StatementIdScheme::Md5Concat.statement_id(
                StatementKind::Addition,
                "http://ex.org/rev/1",
                "http://ex.org/age",
                "30"
            )
        );
        assert_eq!(changes.subject_of_change, "http://ex.org/r1");
        assert!(changes.uri.starts_with("http://ex.org/rev/2/"));
        assert!(changes.uri.ends_with("/changeset"));
    }

    #[test]
    fn literal_tags_do_not_count_as_changes() {
        let store = Arc::new(MemoryTripleStore::new());
        revision(
            &store,
            "http://ex.org/rev/1",
            "http://ex.org/r1",
            &[("http://ex.org/name", Term::lang_literal("Alice", "en"))],
        );
        revision(
            &store,
            "http://ex.org/rev/2",
            "http://ex.org/r1",
            &[("http://ex.org/name", Term::literal("Alice"))],
        );
        let service = RevisionService::builder(store).build();
        let changes = service
            .diff(
                &RequestContext::new("ann"),
                "http://ex.org/rev/1",
                "http://ex.org/rev/2",
                DATASET,
            )
            .expect("diff");
        assert!(changes.is_empty());
    }

    #[test]
    fn missing_side_is_a_cascade_with_reader_code() {
        let service = fixture();
        let err = service
            .diff(
                &RequestContext::new("ann"),
                "http://ex.org/rev/1",
                "http://ex.org/rev/404",
                DATASET,
            )
            .expect_err("right side absent");
        assert!(matches!(err, RevisionError::Cascade { step: "read-right", .. }));
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn different_records_are_rejected() {
        let service = fixture();
        let err = service
            .diff(
                &RequestContext::new("ann"),
                "http://ex.org/rev/1",
                "http://ex.org/rev/x",
                DATASET,
            )
            .expect_err("cross record");
        assert!(matches!(
            err,
            RevisionError::CrossRecord { left_record, right_record }
                if left_record == "http://ex.org/r1" && right_record == "http://ex.org/r2"
        ));
    }
}
