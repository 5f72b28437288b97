use crate::support::{GlobalArgs, load_session_or_exit, print_json, with_service_or_exit};
use serde_json::json;

pub fn run(
    globals: &GlobalArgs,
    left: String,
    right: String,
    dataset: String,
    triples: bool,
    json_output: bool,
) {
    let session = load_session_or_exit(globals);
    let changeset = with_service_or_exit(&session, |service, ctx| {
        service.diff(ctx, &left, &right, &dataset)
    });

    if json_output {
        print_json(
            "revision.diff",
            &json!({
                "action": "revision.diff",
                "left": left,
                "right": right,
                "dataset": dataset,
                "removalCount": changeset.removals.len(),
                "additionCount": changeset.additions.len(),
                "changeset": changeset,
            }),
        );
        return;
    }

    if triples {
        for triple in changeset.to_triples() {
            println!("{triple}");
        }
        return;
    }

    println!("graphrev diff");
    println!("  Subject: {}", changeset.subject_of_change);
    println!("  Created: {}", changeset.create_date_literal());
    println!("  Removals: {}", changeset.removals.len());
    for statement in &changeset.removals {
        println!("    - <{}> {}", statement.predicate, statement.object);
    }
    println!("  Additions: {}", changeset.additions.len());
    for statement in &changeset.additions {
        println!("    + <{}> {}", statement.predicate, statement.object);
    }
}
