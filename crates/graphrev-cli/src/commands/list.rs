use crate::support::{GlobalArgs, load_session_or_exit, parse_or_exit, print_json, with_service_or_exit};
use graphrev_model::ListDetail;
use serde_json::json;

pub fn run(globals: &GlobalArgs, record: String, dataset: String, detail: String, json_output: bool) {
    let detail: ListDetail = parse_or_exit(&detail);
    let session = load_session_or_exit(globals);
    let revisions = with_service_or_exit(&session, |service, ctx| {
        service.list(ctx, &record, &dataset, detail)
    });

    if json_output {
        print_json(
            "revision.list",
            &json!({
                "action": "revision.list",
                "record": record,
                "dataset": dataset,
                "detail": detail.as_str(),
                "count": revisions.len(),
                "revisions": revisions,
            }),
        );
        return;
    }

    println!("graphrev list");
    println!("  Record: {record}");
    println!("  Revisions: {}", revisions.len());
    for summary in &revisions {
        let mut line = format!("  - {} (time={})", summary.revision_uri, summary.revision_time);
        if let Some(status) = summary.revision_status {
            line.push_str(&format!(" [{status}]"));
        }
        if let Some(performer) = &summary.performer {
            line.push_str(&format!(" by {performer}"));
        }
        println!("{line}");
    }
}
