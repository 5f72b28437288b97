use crate::support::{GlobalArgs, load_session_or_exit};
use graphrev_store::{MemoryTripleStore, Quad, write_quads, write_quads_to_path};

pub fn run(globals: &GlobalArgs, graph: Option<String>, output: Option<String>) {
    let session = load_session_or_exit(globals);
    let path = session.store_path();
    let store = if path.exists() {
        MemoryTripleStore::load_jsonl(path).unwrap_or_else(|e| {
            eprintln!("error: failed to load {}: {e}", path.display());
            std::process::exit(1);
        })
    } else {
        MemoryTripleStore::new()
    };

    let quads: Vec<Quad> = store
        .quads()
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        })
        .into_iter()
        .filter(|quad| graph.as_deref().is_none_or(|graph| quad.graph == graph))
        .collect();

    let written = match &output {
        Some(output) => write_quads_to_path(output, &quads),
        None => write_quads(&mut std::io::stdout().lock(), &quads),
    };
    if let Err(e) = written {
        eprintln!("error: failed to write quads: {e}");
        std::process::exit(1);
    }
    tracing::info!(quads = quads.len(), "store exported");
}
