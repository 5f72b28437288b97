use crate::support::{GlobalArgs, load_session_or_exit, parse_or_exit, print_json, with_service_or_exit};
use graphrev_model::ReadMode;
use serde_json::json;

pub fn run(globals: &GlobalArgs, revision: String, dataset: String, mode: String, json_output: bool) {
    let mode: ReadMode = parse_or_exit(&mode);
    let session = load_session_or_exit(globals);
    let snapshot = with_service_or_exit(&session, |service, ctx| {
        service.read(ctx, &revision, &dataset, mode)
    });

    if json_output {
        print_json(
            "revision.read",
            &json!({
                "action": "revision.read",
                "revision": revision,
                "dataset": dataset,
                "mode": mode.as_str(),
                "snapshot": snapshot,
            }),
        );
        return;
    }

    println!("graphrev read");
    println!("  Revision: {revision}");
    println!("  Mode: {}", mode.as_str());
    println!("  Subject: {}", snapshot.subject);
    for triple in snapshot.to_triples() {
        println!("  - <{}> {}", triple.predicate, triple.object);
    }
}
