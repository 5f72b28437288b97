use graphrev_model::{
    DeleteMode, LifecycleStatus, ListDetail, ReadMode, ReifiedStatement, Snapshot,
    StatementIdScheme, StatementKind, Term, Triple, vocab,
};
use graphrev_revision::{
    AccessList, CacheBucket, CancelToken, Capability, CollaboratorError, ErrorKind, GraphCrud,
    MemoryCache, RecordCrud, RequestContext, RevisionError, RevisionService,
};
use graphrev_store::{MemoryTripleStore, StoreError, TriplePattern, TripleStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

const DATASET: &str = "http://ex.org/ds/";
const GRAPH: &str = "http://ex.org/ds/revisions/";
const RECORD: &str = "http://ex.org/r1";
const NAME: &str = "http://ex.org/name";
const AGE: &str = "http://ex.org/age";

/// Memory store that counts statements and can refuse `modify`.
#[derive(Default)]
struct InstrumentedStore {
    inner: MemoryTripleStore,
    statements: AtomicUsize,
    refuse_modify: AtomicBool,
}

impl InstrumentedStore {
    fn statements(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.statements.fetch_add(1, Ordering::SeqCst);
    }
}

impl TripleStore for InstrumentedStore {
    fn select(&self, graph: &str, pattern: &TriplePattern) -> Result<Vec<Triple>, StoreError> {
        self.tick();
        self.inner.select(graph, pattern)
    }

    fn insert(&self, graph: &str, triples: &[Triple]) -> Result<(), StoreError> {
        self.tick();
        self.inner.insert(graph, triples)
    }

    fn delete_where(&self, graph: &str, pattern: &TriplePattern) -> Result<usize, StoreError> {
        self.tick();
        self.inner.delete_where(graph, pattern)
    }

    fn modify(
        &self,
        graph: &str,
        delete: &TriplePattern,
        insert: &[Triple],
    ) -> Result<usize, StoreError> {
        self.tick();
        if self.refuse_modify.load(Ordering::SeqCst) {
            return Err(StoreError::Query("modify refused".to_string()));
        }
        self.inner.modify(graph, delete, insert)
    }

    fn graphs(&self) -> Result<Vec<String>, StoreError> {
        self.tick();
        self.inner.graphs()
    }
}

/// Live-record collaborator whose upserts can be made to fail.
struct ScriptedCrud {
    live: GraphCrud,
    refusals: AtomicUsize,
}

impl ScriptedCrud {
    fn new(store: Arc<dyn TripleStore>) -> Self {
        Self {
            live: GraphCrud::new(store),
            refusals: AtomicUsize::new(0),
        }
    }

    fn refuse_next_updates(&self, count: usize) {
        self.refusals.store(count, Ordering::SeqCst);
    }
}

impl RecordCrud for ScriptedCrud {
    fn update_record(
        &self,
        ctx: &RequestContext,
        snapshot: &Snapshot,
        dataset: &str,
        lifecycle: LifecycleStatus,
    ) -> Result<(), CollaboratorError> {
        let refused = self
            .refusals
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(CollaboratorError::new("crud_unavailable", "index offline"));
        }
        self.live.update_record(ctx, snapshot, dataset, lifecycle)
    }

    fn delete_record(
        &self,
        ctx: &RequestContext,
        record: &str,
        dataset: &str,
        mode: DeleteMode,
    ) -> Result<(), CollaboratorError> {
        self.live.delete_record(ctx, record, dataset, mode)
    }
}

fn add_revision(store: &dyn TripleStore, uri: &str, record: &str, time: f64, props: &[(&str, &str)]) {
    let mut triples = vec![
        Triple::new(uri, vocab::RDF_TYPE, Term::iri("http://ex.org/Person")),
        Triple::new(uri, vocab::WSF_REVISION_URI, Term::iri(record)),
        Triple::new(uri, vocab::WSF_FROM_DATASET, Term::iri(DATASET)),
        Triple::new(
            uri,
            vocab::WSF_REVISION_TIME,
            Term::typed_literal(time.to_string(), vocab::XSD_DOUBLE),
        ),
        Triple::new(uri, vocab::WSF_PERFORMER, Term::iri("http://ex.org/users/ann")),
    ];
    for (predicate, value) in props {
        triples.push(Triple::new(uri, *predicate, Term::literal(*value)));
    }
    store.insert(GRAPH, &triples).expect("revision fixture should insert");
}

fn statement_pairs(statements: &[ReifiedStatement]) -> BTreeSet<(String, Term)> {
    statements
        .iter()
        .map(|s| (s.predicate.clone(), s.object.clone()))
        .collect()
}

fn ctx() -> RequestContext {
    RequestContext::new("http://ex.org/users/ann")
}

fn published(service: &RevisionService, record: &str) -> Vec<String> {
    service
        .list(&ctx(), record, DATASET, ListDetail::Long)
        .expect("list should succeed")
        .into_iter()
        .filter(|s| s.revision_status == Some(LifecycleStatus::Published))
        .map(|s| s.revision_uri)
        .collect()
}

fn live_triples(store: &dyn TripleStore) -> BTreeSet<(String, String)> {
    store
        .select(DATASET, &TriplePattern::subject(RECORD))
        .expect("live select should succeed")
        .into_iter()
        .map(|t| (t.predicate, t.object.lexical().to_string()))
        .collect()
}

#[test]
fn alice_gains_an_age() {
    let store = Arc::new(MemoryTripleStore::new());
    let service = RevisionService::builder(store.clone()).build();
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);

    let change = service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect("publish rev1");
    assert!(change.archived.is_empty());
    assert!(live_triples(&*store).contains(&(NAME.to_string(), "Alice".to_string())));

    add_revision(
        &*store,
        "http://ex.org/rev/2",
        RECORD,
        2.0,
        &[(NAME, "Alice"), (AGE, "30")],
    );
    let change = service
        .set_status(&ctx(), "http://ex.org/rev/2", DATASET, LifecycleStatus::Published)
        .expect("publish rev2");
    assert_eq!(change.archived, vec!["http://ex.org/rev/1".to_string()]);
    assert_eq!(published(&service, RECORD), vec!["http://ex.org/rev/2".to_string()]);

    let live = live_triples(&*store);
    assert!(live.contains(&(NAME.to_string(), "Alice".to_string())));
    assert!(live.contains(&(AGE.to_string(), "30".to_string())));
    assert!(
        !live
            .iter()
            .any(|(p, _)| p == vocab::WSF_REVISION_TIME || p == vocab::WSF_REVISION_URI)
    );

    let changes = service
        .diff(&ctx(), "http://ex.org/rev/1", "http://ex.org/rev/2", DATASET)
        .expect("diff");
    assert!(changes.removals.is_empty());
    assert_eq!(changes.additions.len(), 1);
    assert_eq!(changes.additions[0].predicate, AGE);
    assert_eq!(changes.additions[0].object, Term::literal("30"));
    assert_eq!(changes.subject_of_change, RECORD);
}

#[test]
fn repeated_reads_are_byte_identical() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(
        &*store,
        "http://ex.org/rev/1",
        RECORD,
        1.0,
        &[(NAME, "Alice"), (AGE, "30")],
    );
    let service = RevisionService::builder(store).build();

    for mode in [ReadMode::Revision, ReadMode::Record] {
        let first = service
            .read(&ctx(), "http://ex.org/rev/1", DATASET, mode)
            .expect("first read");
        let second = service
            .read(&ctx(), "http://ex.org/rev/1", DATASET, mode)
            .expect("second read");
        assert_eq!(
            serde_json::to_string(&first).expect("serialize"),
            serde_json::to_string(&second).expect("serialize")
        );
    }
}

#[test]
fn at_most_one_published_after_any_sequence() {
    let store = Arc::new(MemoryTripleStore::new());
    for (i, uri) in ["http://ex.org/rev/1", "http://ex.org/rev/2", "http://ex.org/rev/3"]
        .iter()
        .enumerate()
    {
        add_revision(&*store, uri, RECORD, i as f64, &[(NAME, *uri)]);
    }
    let service = RevisionService::builder(store).build();
    let steps = [
        ("http://ex.org/rev/1", LifecycleStatus::Published),
        ("http://ex.org/rev/2", LifecycleStatus::Published),
        ("http://ex.org/rev/2", LifecycleStatus::Staging),
        ("http://ex.org/rev/3", LifecycleStatus::Published),
        ("http://ex.org/rev/1", LifecycleStatus::Published),
        ("http://ex.org/rev/1", LifecycleStatus::Published),
        ("http://ex.org/rev/3", LifecycleStatus::Harvesting),
    ];
    for (revision, status) in steps {
        service
            .set_status(&ctx(), revision, DATASET, status)
            .expect("transition should succeed");
        assert!(published(&service, RECORD).len() <= 1);
    }
    assert_eq!(published(&service, RECORD), vec!["http://ex.org/rev/1".to_string()]);
}

#[test]
fn concurrent_publishes_leave_one_winner() {
    let store = Arc::new(MemoryTripleStore::new());
    let revisions: Vec<String> = (0..6).map(|i| format!("http://ex.org/rev/{i}")).collect();
    for (i, uri) in revisions.iter().enumerate() {
        add_revision(&*store, uri, RECORD, i as f64, &[(NAME, uri.as_str())]);
    }
    let service = Arc::new(RevisionService::builder(store).build());

    let workers: Vec<_> = revisions
        .iter()
        .cloned()
        .map(|uri| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .set_status(&ctx(), &uri, DATASET, LifecycleStatus::Published)
                    .expect("publish should succeed");
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker should not panic");
    }
    assert_eq!(published(&service, RECORD).len(), 1);
}

#[test]
fn diff_of_a_revision_with_itself_is_empty() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    let service = RevisionService::builder(store).build();
    let changes = service
        .diff(&ctx(), "http://ex.org/rev/1", "http://ex.org/rev/1", DATASET)
        .expect("diff");
    assert!(changes.removals.is_empty());
    assert!(changes.additions.is_empty());
}

#[test]
fn diff_is_set_symmetric() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(
        &*store,
        "http://ex.org/rev/a",
        RECORD,
        1.0,
        &[(NAME, "Alice"), (AGE, "29"), ("http://ex.org/city", "Lyon")],
    );
    add_revision(
        &*store,
        "http://ex.org/rev/b",
        RECORD,
        2.0,
        &[(NAME, "Alice"), (AGE, "30"), ("http://ex.org/job", "pilot")],
    );
    let service = RevisionService::builder(store).build();

    let forward = service
        .diff(&ctx(), "http://ex.org/rev/a", "http://ex.org/rev/b", DATASET)
        .expect("forward diff");
    let backward = service
        .diff(&ctx(), "http://ex.org/rev/b", "http://ex.org/rev/a", DATASET)
        .expect("backward diff");

    assert_eq!(statement_pairs(&forward.additions), statement_pairs(&backward.removals));
    assert_eq!(statement_pairs(&forward.removals), statement_pairs(&backward.additions));
    assert_eq!(forward.additions.len(), 2);
    assert_eq!(forward.removals.len(), 2);
}

#[test]
fn diff_across_records_fails_both_ways() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    add_revision(
        &*store,
        "http://ex.org/rev/9",
        "http://ex.org/r2",
        1.0,
        &[(NAME, "Bob")],
    );
    let service = RevisionService::builder(store).build();

    for (left, right) in [
        ("http://ex.org/rev/1", "http://ex.org/rev/9"),
        ("http://ex.org/rev/9", "http://ex.org/rev/1"),
    ] {
        let err = service
            .diff(&ctx(), left, right, DATASET)
            .expect_err("cross-record diff must fail");
        assert_eq!(err.kind(), ErrorKind::CrossRecord);
    }
}

#[test]
fn statement_ids_are_stable_and_follow_the_interface() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    add_revision(&*store, "http://ex.org/rev/2", RECORD, 2.0, &[(NAME, "Alicia")]);

    let legacy = RevisionService::builder(store.clone()).build();
    let first = legacy
        .diff(&ctx(), "http://ex.org/rev/1", "http://ex.org/rev/2", DATASET)
        .expect("diff");
    let again = legacy
        .diff(&ctx(), "http://ex.org/rev/1", "http://ex.org/rev/2", DATASET)
        .expect("diff");
    assert_eq!(first.removals, again.removals);
    assert_eq!(first.additions, again.additions);
    assert_eq!(
        first.removals[0].id,
        StatementIdScheme::Md5Concat.statement_id(
            StatementKind::Removal,
            "http://ex.org/rev/1",
            NAME,
            "Alice"
        )
    );

    let hashed = RevisionService::builder(store)
        .interface_version("2.0")
        .expect("2.0 is registered")
        .build();
    let changes = hashed
        .diff(&ctx(), "http://ex.org/rev/1", "http://ex.org/rev/2", DATASET)
        .expect("diff");
    assert_eq!(hashed.interface().version(), "2.0");
    assert_eq!(
        changes.additions[0].id,
        StatementIdScheme::Sha256Fields.statement_id(
            StatementKind::Addition,
            "http://ex.org/rev/1",
            NAME,
            "Alicia"
        )
    );
}

#[test]
fn hard_delete_leaves_no_trace_of_the_history() {
    let store = Arc::new(MemoryTripleStore::new());
    let service = RevisionService::builder(store.clone()).build();
    let revisions = ["http://ex.org/rev/1", "http://ex.org/rev/2", "http://ex.org/rev/3"];
    for (i, uri) in revisions.iter().enumerate() {
        add_revision(&*store, uri, RECORD, i as f64, &[(NAME, "Alice")]);
        store
            .insert(
                GRAPH,
                &[
                    Triple::new(format!("_:prov{i}"), vocab::RDF_SUBJECT, Term::iri(*uri)),
                    Triple::new(format!("_:prov{i}"), vocab::RDF_PREDICATE, Term::iri(NAME)),
                    Triple::new(format!("_:prov{i}"), vocab::RDF_OBJECT, Term::literal("Alice")),
                    Triple::new(
                        format!("_:prov{i}"),
                        "http://ex.org/source",
                        Term::iri("http://ex.org/census"),
                    ),
                ],
            )
            .expect("provenance fixture");
    }
    service
        .set_status(&ctx(), "http://ex.org/rev/2", DATASET, LifecycleStatus::Published)
        .expect("publish");

    let outcome = service
        .delete(&ctx(), "http://ex.org/rev/1", DATASET, DeleteMode::Hard)
        .expect("hard delete");
    assert_eq!(outcome.deleted.len(), 3);

    let remaining = store
        .select(GRAPH, &TriplePattern::any())
        .expect("select revisions graph");
    assert!(
        remaining.is_empty(),
        "revisions graph should be empty, found {remaining:?}"
    );
    assert!(
        live_triples(&*store).is_empty(),
        "no live copy may outlive its published revision"
    );
}

#[test]
fn failed_hard_delete_puts_the_live_copy_back() {
    let store = Arc::new(InstrumentedStore::default());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    add_revision(&*store, "http://ex.org/rev/2", RECORD, 2.0, &[(NAME, "Alicia")]);
    let service = RevisionService::builder(store.clone()).build();
    service
        .set_status(&ctx(), "http://ex.org/rev/2", DATASET, LifecycleStatus::Published)
        .expect("publish rev2");
    let live_before = live_triples(&*store);
    assert!(!live_before.is_empty());

    // The live copy is pulled, then archiving the published revision fails.
    store.refuse_modify.store(true, Ordering::SeqCst);
    let err = service
        .delete(&ctx(), "http://ex.org/rev/1", DATASET, DeleteMode::Hard)
        .expect_err("archive refused");
    assert_eq!(err.kind(), ErrorKind::Store);
    store.refuse_modify.store(false, Ordering::SeqCst);

    assert_eq!(live_triples(&*store), live_before);
    assert_eq!(published(&service, RECORD), vec!["http://ex.org/rev/2".to_string()]);
    assert_eq!(
        service
            .list(&ctx(), RECORD, DATASET, ListDetail::Short)
            .expect("list")
            .len(),
        2
    );
    assert!(service.repairs().entries().is_empty());
}

#[test]
fn denied_actor_never_reaches_the_store() {
    let store = Arc::new(InstrumentedStore::default());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    let service = RevisionService::builder(store.clone())
        .access(Arc::new(AccessList::new().grant(
            "http://ex.org/users/ann",
            DATASET,
            [Capability::Read],
        )))
        .build();
    let before = store.statements();

    let err = service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect_err("update not granted");
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    let err = service
        .delete(&ctx(), "http://ex.org/rev/1", DATASET, DeleteMode::Soft)
        .expect_err("delete not granted");
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    let err = service
        .read(
            &RequestContext::new("http://ex.org/users/eve"),
            "http://ex.org/rev/1",
            DATASET,
            ReadMode::Record,
        )
        .expect_err("eve has no grant");
    assert_eq!(err.code(), "access_denied");

    assert_eq!(store.statements(), before);
}

#[test]
fn cancelled_request_stops_before_the_store() {
    let store = Arc::new(InstrumentedStore::default());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    let service = RevisionService::builder(store.clone()).build();
    let token = CancelToken::new();
    let ctx = ctx().with_cancel_token(token.clone());
    token.cancel();
    let before = store.statements();

    let err = service
        .set_status(&ctx, "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect_err("cancelled");
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(store.statements(), before);
}

#[test]
fn failed_upsert_rolls_the_publish_back() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    add_revision(&*store, "http://ex.org/rev/2", RECORD, 2.0, &[(NAME, "Alicia")]);
    let crud = Arc::new(ScriptedCrud::new(store.clone()));
    let service = RevisionService::builder(store.clone())
        .crud(crud.clone())
        .build();

    service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect("publish rev1");
    service
        .set_status(&ctx(), "http://ex.org/rev/2", DATASET, LifecycleStatus::Staging)
        .expect("stage rev2");
    let live_before = live_triples(&*store);

    crud.refuse_next_updates(1);
    let err = service
        .set_status(&ctx(), "http://ex.org/rev/2", DATASET, LifecycleStatus::Published)
        .expect_err("upsert refused");
    assert_eq!(err.kind(), ErrorKind::CascadeFailure);
    assert_eq!(err.code(), "crud_unavailable");
    assert_eq!(err.to_string(), "crud_unavailable: index offline");

    // rev1 is published again, rev2 is back to staging, the live copy is rev1.
    let statuses = service
        .list(&ctx(), RECORD, DATASET, ListDetail::Long)
        .expect("list");
    let status_of = |uri: &str| {
        statuses
            .iter()
            .find(|s| s.revision_uri == uri)
            .and_then(|s| s.revision_status)
    };
    assert_eq!(status_of("http://ex.org/rev/1"), Some(LifecycleStatus::Published));
    assert_eq!(status_of("http://ex.org/rev/2"), Some(LifecycleStatus::Staging));
    assert_eq!(live_triples(&*store), live_before);
    assert!(service.repairs().entries().is_empty());
}

#[test]
fn failed_republish_keeps_the_live_copy() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    let crud = Arc::new(ScriptedCrud::new(store.clone()));
    let service = RevisionService::builder(store.clone())
        .crud(crud.clone())
        .build();
    service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect("publish rev1");
    let live_before = live_triples(&*store);
    assert!(!live_before.is_empty());

    crud.refuse_next_updates(1);
    let err = service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect_err("upsert refused");
    assert_eq!(err.code(), "crud_unavailable");

    assert_eq!(published(&service, RECORD), vec!["http://ex.org/rev/1".to_string()]);
    assert_eq!(live_triples(&*store), live_before);
    assert!(service.repairs().entries().is_empty());
}

#[test]
fn failed_compensation_is_recorded_for_repair() {
    let store = Arc::new(InstrumentedStore::default());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    let crud = Arc::new(ScriptedCrud::new(store.clone()));
    let service = RevisionService::builder(store.clone())
        .crud(crud.clone())
        .build();
    service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Published)
        .expect("publish");

    // The live copy is pulled, the status write fails, and putting the live
    // copy back fails too.
    crud.refuse_next_updates(usize::MAX);
    store.refuse_modify.store(true, Ordering::SeqCst);
    let err = service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Archive)
        .expect_err("status write refused");
    assert_eq!(err.kind(), ErrorKind::Store);

    let entries = service.repairs().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record, RECORD);
    assert_eq!(entries[0].cascade, "unpublish");
    assert_eq!(entries[0].failed_step, "set-status");
    assert_eq!(entries[0].compensation, "delete-live-record");
    assert!(service.repairs().needs_repair(RECORD));
}

#[test]
fn mutations_invalidate_every_bucket() {
    let store = Arc::new(MemoryTripleStore::new());
    add_revision(&*store, "http://ex.org/rev/1", RECORD, 1.0, &[(NAME, "Alice")]);
    add_revision(&*store, "http://ex.org/rev/2", RECORD, 2.0, &[(NAME, "Alicia")]);
    let cache = Arc::new(MemoryCache::new());
    let service = RevisionService::builder(store)
        .cache(cache.clone())
        .build();

    let before = service
        .list(&ctx(), RECORD, DATASET, ListDetail::Long)
        .expect("list");
    assert!(before.iter().all(|s| s.revision_status == Some(LifecycleStatus::Unspecified)));
    assert!(!cache.is_empty());

    service
        .set_status(&ctx(), "http://ex.org/rev/1", DATASET, LifecycleStatus::Experimental)
        .expect("transition");
    let after = service
        .list(&ctx(), RECORD, DATASET, ListDetail::Long)
        .expect("list");
    assert!(
        after
            .iter()
            .any(|s| s.revision_status == Some(LifecycleStatus::Experimental))
    );

    service
        .delete(&ctx(), "http://ex.org/rev/2", DATASET, DeleteMode::Soft)
        .expect("delete");
    for bucket in [
        CacheBucket::RevisionRead,
        CacheBucket::RevisionLister,
        CacheBucket::Search,
        CacheBucket::Sparql,
        CacheBucket::CrudRead,
    ] {
        assert_eq!(cache.invalidation_count(bucket), 2, "{}", bucket.as_str());
    }
    assert_eq!(
        service
            .list(&ctx(), RECORD, DATASET, ListDetail::Short)
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn failed_operations_do_not_invalidate() {
    let store = Arc::new(MemoryTripleStore::new());
    let cache = Arc::new(MemoryCache::new());
    let service = RevisionService::builder(store).cache(cache.clone()).build();
    let err = service
        .delete(&ctx(), "http://ex.org/rev/404", DATASET, DeleteMode::Soft)
        .expect_err("absent");
    assert!(matches!(err, RevisionError::NotFound(_)));
    assert_eq!(cache.invalidation_count(CacheBucket::RevisionRead), 0);
}
