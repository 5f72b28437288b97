use crate::support::{
    GlobalArgs, load_session_or_exit, mutate_with_service_or_exit, parse_or_exit, print_json,
};
use graphrev_model::LifecycleStatus;
use serde_json::json;

pub fn run(globals: &GlobalArgs, revision: String, status: String, dataset: String, json_output: bool) {
    let status: LifecycleStatus = parse_or_exit(&status);
    let session = load_session_or_exit(globals);
    let change = mutate_with_service_or_exit(&session, |service, ctx| {
        service.set_status(ctx, &revision, &dataset, status)
    });

    if json_output {
        print_json(
            "revision.status",
            &json!({
                "action": "revision.status",
                "dataset": dataset,
                "change": change,
            }),
        );
        return;
    }

    println!("graphrev status");
    println!("  Revision: {}", change.revision);
    println!("  Record: {}", change.record);
    println!("  Status: {} -> {}", change.previous, change.current);
    for archived in &change.archived {
        println!("  - archived {archived}");
    }
}
