use std::collections::{BTreeMap, BTreeSet};

use oxrdf::{Graph, Triple};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::classification::{ClassificationSet, Classifications};
use crate::ruleset::Ruleset;

// ------------- MetaBase -------------
/// Selects one of the two independent classification namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Types,
    Shapes,
}

/// The two classification namespaces kept for a dataset.
///
/// Rulesets only see a store through this trait, so any pair of
/// [`Classifications`] implementations can stand in for the default one.
pub trait MetaBase {
    fn types(&self) -> &dyn Classifications;
    fn shapes(&self) -> &dyn Classifications;
    fn types_mut(&mut self) -> &mut dyn Classifications;
    fn shapes_mut(&mut self) -> &mut dyn Classifications;

    fn namespace(&self, namespace: Namespace) -> &dyn Classifications {
        match namespace {
            Namespace::Types => self.types(),
            Namespace::Shapes => self.shapes(),
        }
    }
    fn namespace_mut(&mut self, namespace: Namespace) -> &mut dyn Classifications {
        match namespace {
            Namespace::Types => self.types_mut(),
            Namespace::Shapes => self.shapes_mut(),
        }
    }
}

// ------------- ClassificationStore -------------
/// Types and shapes of every resource of one dataset.
///
/// The store owns both classification sets and borrows the ruleset, which
/// may be shared with other stores. Construction seeds the axioms, so the
/// sets already reflect them before the first triple is processed.
pub struct ClassificationStore<'r> {
    ruleset: &'r dyn Ruleset,
    types: ClassificationSet,
    shapes: ClassificationSet,
}

impl<'r> ClassificationStore<'r> {
    pub fn new(ruleset: &'r dyn Ruleset) -> Self {
        let mut store = Self {
            ruleset,
            types: ClassificationSet::new(),
            shapes: ClassificationSet::new(),
        };
        ruleset.add_axioms(&mut store);
        trace!(types = store.types.len(), shapes = store.shapes.len(), "axioms seeded");
        store
    }
    /// Hands a newly observed triple to the ruleset. Must be called exactly
    /// once per new fact, in the order facts were added to `dataset`.
    pub fn on_new_triple(&mut self, triple: &Triple, dataset: &Graph) {
        trace!(%triple, "new triple");
        let ruleset = self.ruleset;
        ruleset.on_new_triple(triple, dataset, self);
    }
    pub fn type_set(&self) -> &ClassificationSet {
        &self.types
    }
    pub fn shape_set(&self) -> &ClassificationSet {
        &self.shapes
    }
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            types: Snapshot::namespace(&self.types),
            shapes: Snapshot::namespace(&self.shapes),
        }
    }
}

impl MetaBase for ClassificationStore<'_> {
    fn types(&self) -> &dyn Classifications {
        &self.types
    }
    fn shapes(&self) -> &dyn Classifications {
        &self.shapes
    }
    fn types_mut(&mut self) -> &mut dyn Classifications {
        &mut self.types
    }
    fn shapes_mut(&mut self) -> &mut dyn Classifications {
        &mut self.shapes
    }
}

// ------------- Snapshot -------------
/// Owned, ordered copy of a store, keyed and valued by the N-Triples form
/// of each term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub types: BTreeMap<String, BTreeSet<String>>,
    pub shapes: BTreeMap<String, BTreeSet<String>>,
}

impl Snapshot {
    fn namespace(set: &ClassificationSet) -> BTreeMap<String, BTreeSet<String>> {
        set.iter()
            .map(|(resource, classifiers)| {
                (
                    resource.to_string(),
                    classifiers.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}
