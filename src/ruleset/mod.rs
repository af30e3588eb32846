//! The reasoning side of the store/ruleset contract.
//!
//! A [`Ruleset`] decides which types and shapes hold; the store only keeps
//! what it is told. Both entry points receive the store as an explicit
//! argument and write their conclusions back through it.

mod schema;

pub use schema::{PropertyLink, SchemaRuleset};

use oxrdf::{Graph, Triple};

use crate::store::MetaBase;

pub trait Ruleset {
    /// Seeds classifications that hold regardless of the data. Called once,
    /// while the store is being constructed and before any triple.
    fn add_axioms(&self, meta: &mut dyn MetaBase);
    /// Derives classifications from a newly observed `triple`. `dataset`
    /// already contains the triple and every triple observed before it.
    fn on_new_triple(&self, triple: &Triple, dataset: &Graph, meta: &mut dyn MetaBase);
}
