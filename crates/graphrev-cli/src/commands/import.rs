use crate::support::{GlobalArgs, load_session_or_exit, print_json};
use graphrev_store::{
    AtomicStoreMutationError, TripleStore, mutate_store_jsonl, read_quads_from_path,
};
use serde_json::json;

pub fn run(globals: &GlobalArgs, file: String, json_output: bool) {
    let session = load_session_or_exit(globals);
    let quads = read_quads_from_path(&file).unwrap_or_else(|e| {
        eprintln!("error: failed to read {file}: {e}");
        std::process::exit(1);
    });

    let (before, after) = mutate_store_jsonl::<_, String, _>(session.store_path(), |store| {
        let before = store.quad_count().map_err(|e| e.to_string())?;
        for quad in quads {
            let (graph, triple) = quad.into_parts();
            store
                .insert(&graph, &[triple])
                .map_err(|e| format!("failed to insert into {graph}: {e}"))?;
        }
        let after = store.quad_count().map_err(|e| e.to_string())?;
        Ok(((before, after), after != before))
    })
    .unwrap_or_else(|error| {
        match error {
            AtomicStoreMutationError::Mutation(message) => eprintln!("error: {message}"),
            other => eprintln!("error: {other}"),
        }
        std::process::exit(1);
    });
    let added = after - before;
    tracing::info!(file = %file, added, "quads imported");

    if json_output {
        print_json(
            "store.import",
            &json!({
                "action": "store.import",
                "file": file,
                "storePath": session.store_path().display().to_string(),
                "added": added,
                "quadCount": after,
            }),
        );
        return;
    }

    println!("graphrev import");
    println!("  Store: {}", session.store_path().display());
    println!("  Added: {added}");
    println!("  Quads: {after}");
}
