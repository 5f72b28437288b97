use crate::support::{
    GlobalArgs, load_session_or_exit, mutate_with_service_or_exit, parse_or_exit, print_json,
};
use graphrev_model::DeleteMode;
use serde_json::json;

pub fn run(globals: &GlobalArgs, revision: String, dataset: String, mode: String, json_output: bool) {
    let mode: DeleteMode = parse_or_exit(&mode);
    let session = load_session_or_exit(globals);
    let outcome = mutate_with_service_or_exit(&session, |service, ctx| {
        service.delete(ctx, &revision, &dataset, mode)
    });

    if json_output {
        print_json(
            "revision.delete",
            &json!({
                "action": "revision.delete",
                "dataset": dataset,
                "deletedCount": outcome.deleted.len(),
                "outcome": outcome,
            }),
        );
        return;
    }

    println!("graphrev delete");
    println!("  Record: {}", outcome.record);
    println!("  Mode: {}", outcome.mode.as_str());
    for archived in &outcome.archived {
        println!("  - archived {archived}");
    }
    for deleted in &outcome.deleted {
        println!("  - deleted {deleted}");
    }
}
