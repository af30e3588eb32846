use std::collections::hash_map::Iter;

use oxrdf::Term;

use crate::term::{TermMap, TermSet};

// ------------- Classifications -------------
/// Capability of a single classification namespace (types or shapes).
///
/// Implementations are append-only: once `add` has returned `true` for a
/// `(resource, classifier)` pair the classifier stays in `get_all(resource)`
/// for the lifetime of the implementation.
pub trait Classifications {
    /// Records that `resource` is classified by `classifier`.
    ///
    /// Returns `true` when the membership is new and `false` when it was
    /// already recorded. Forward-chaining rulesets use this to decide whether
    /// to keep propagating.
    fn add(&mut self, resource: &Term, classifier: &Term) -> bool;
    /// All classifiers recorded for `resource`, empty if there are none.
    fn get_all(&self, resource: &Term) -> &TermSet;

    fn contains(&self, resource: &Term, classifier: &Term) -> bool {
        self.get_all(resource).contains(classifier)
    }
}

// ------------- ClassificationSet -------------
#[derive(Debug, Default)]
pub struct ClassificationSet {
    index: TermMap<TermSet>,
    // handed out for resources that were never classified
    empty: TermSet,
}

impl ClassificationSet {
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of resources with at least one classifier.
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    pub fn iter(&self) -> Iter<'_, Term, TermSet> {
        self.index.iter()
    }
}

impl Classifications for ClassificationSet {
    fn add(&mut self, resource: &Term, classifier: &Term) -> bool {
        if let Some(classified_as) = self.index.get_mut(resource) {
            if classified_as.contains(classifier) {
                return false;
            }
            return classified_as.insert(classifier.clone());
        }
        self.index
            .entry(resource.clone())
            .or_default()
            .insert(classifier.clone())
    }
    fn get_all(&self, resource: &Term) -> &TermSet {
        self.index.get(resource).unwrap_or(&self.empty)
    }
}

impl<'a> IntoIterator for &'a ClassificationSet {
    type Item = (&'a Term, &'a TermSet);
    type IntoIter = Iter<'a, Term, TermSet>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
