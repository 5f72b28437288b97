//! In-memory quad store.
//!
//! - named graphs of ordered triple sets
//! - JSONL load/save
//! - every statement runs under one write lock, so each is atomic

use crate::jsonl::{Quad, read_quads_from_path, write_quads_to_path};
use crate::protocol::{StoreError, TriplePattern, TripleStore};
use graphrev_model::Triple;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Graphs = BTreeMap<String, BTreeSet<Triple>>;

#[derive(Debug, Default)]
pub struct MemoryTripleStore {
    graphs: RwLock<Graphs>,
}

impl MemoryTripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from quads. Duplicate quads collapse.
    pub fn from_quads(quads: impl IntoIterator<Item = Quad>) -> Self {
        let mut graphs = Graphs::new();
        for quad in quads {
            let (graph, triple) = quad.into_parts();
            graphs.entry(graph).or_default().insert(triple);
        }
        Self {
            graphs: RwLock::new(graphs),
        }
    }

    /// Load store state from a JSONL file.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let quads = read_quads_from_path(path)?;
        Ok(Self::from_quads(quads))
    }

    /// Persist store state to a JSONL file.
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let quads = self.quads()?;
        write_quads_to_path(path, &quads)
    }

    /// Every quad in deterministic (graph, triple) order.
    pub fn quads(&self) -> Result<Vec<Quad>, StoreError> {
        let graphs = self.read()?;
        Ok(graphs
            .iter()
            .flat_map(|(graph, triples)| {
                triples
                    .iter()
                    .map(move |triple| Quad::new(graph.clone(), triple.clone()))
            })
            .collect())
    }

    pub fn quad_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.values().map(BTreeSet::len).sum())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Graphs>, StoreError> {
        self.graphs.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Graphs>, StoreError> {
        self.graphs.write().map_err(|_| StoreError::Poisoned)
    }
}

fn remove_matching(graphs: &mut Graphs, graph: &str, pattern: &TriplePattern) -> usize {
    let Some(triples) = graphs.get_mut(graph) else {
        return 0;
    };
    let before = triples.len();
    triples.retain(|triple| !pattern.matches(triple));
    let removed = before - triples.len();
    if triples.is_empty() {
        graphs.remove(graph);
    }
    removed
}

impl TripleStore for MemoryTripleStore {
    fn select(&self, graph: &str, pattern: &TriplePattern) -> Result<Vec<Triple>, StoreError> {
        let graphs = self.read()?;
        Ok(graphs
            .get(graph)
            .map(|triples| {
                triples
                    .iter()
                    .filter(|triple| pattern.matches(triple))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn insert(&self, graph: &str, triples: &[Triple]) -> Result<(), StoreError> {
        if triples.is_empty() {
            return Ok(());
        }
        let mut graphs = self.write()?;
        graphs
            .entry(graph.to_string())
            .or_default()
            .extend(triples.iter().cloned());
        Ok(())
    }

    fn delete_where(&self, graph: &str, pattern: &TriplePattern) -> Result<usize, StoreError> {
        let mut graphs = self.write()?;
        Ok(remove_matching(&mut graphs, graph, pattern))
    }

    fn modify(
        &self,
        graph: &str,
        delete: &TriplePattern,
        insert: &[Triple],
    ) -> Result<usize, StoreError> {
        let mut graphs = self.write()?;
        let removed = remove_matching(&mut graphs, graph, delete);
        if !insert.is_empty() {
            graphs
                .entry(graph.to_string())
                .or_default()
                .extend(insert.iter().cloned());
        }
        Ok(removed)
    }

    fn graphs(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read()?.keys().cloned().collect())
    }
}
