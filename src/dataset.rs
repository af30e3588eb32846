use oxrdf::{Graph, Triple};
use tracing::debug;

use crate::ruleset::Ruleset;
use crate::store::ClassificationStore;

// ------------- Dataset -------------
/// A fact graph together with the classifications derived from it.
///
/// This is the ingestion side the store relies on: triples are deduplicated
/// here, and only triples that were not yet present reach the ruleset, in
/// the order they were inserted.
pub struct Dataset<'r> {
    graph: Graph,
    store: ClassificationStore<'r>,
}

impl<'r> Dataset<'r> {
    pub fn new(ruleset: &'r dyn Ruleset) -> Self {
        Self {
            graph: Graph::new(),
            store: ClassificationStore::new(ruleset),
        }
    }
    /// Adds a triple, returning `false` if it was already known.
    pub fn insert(&mut self, triple: &Triple) -> bool {
        if !self.graph.insert(triple) {
            return false;
        }
        self.store.on_new_triple(triple, &self.graph);
        true
    }
    /// Inserts all triples in order and returns how many of them were new.
    pub fn extend<'t>(&mut self, triples: impl IntoIterator<Item = &'t Triple>) -> usize {
        let mut added = 0;
        for triple in triples {
            if self.insert(triple) {
                added += 1;
            }
        }
        debug!(added, total = self.graph.len(), "triples ingested");
        added
    }
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
    pub fn store(&self) -> &ClassificationStore<'r> {
        &self.store
    }
    pub fn len(&self) -> usize {
        self.graph.len()
    }
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}
