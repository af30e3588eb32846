//! Metastate – incremental type and shape classification of RDF resources.
//!
//! For every resource of a dataset two independent sets of classifiers are
//! kept:
//! * its *types*, the classes it is an instance of, and
//! * its *shapes*, the SHACL shapes it is expected to conform to.
//!
//! Deciding which types and shapes hold is the job of a [`ruleset::Ruleset`].
//! The [`store::ClassificationStore`] only records what the ruleset derives:
//! it asks the ruleset to seed its axioms when constructed, and forwards every
//! new triple to it afterwards. Classifications only ever grow; nothing is
//! retracted.
//!
//! ## Modules
//! * [`term`] – Term identity, hashing and the RDFS/SHACL vocabulary used.
//! * [`classification`] – The [`classification::Classifications`] capability
//!   and its default [`classification::ClassificationSet`] implementation.
//! * [`store`] – The two-namespace store and the [`store::MetaBase`] trait
//!   rulesets write through.
//! * [`ruleset`] – The ruleset contract plus [`ruleset::SchemaRuleset`], which
//!   derives classifications from an RDFS/SHACL schema graph.
//! * [`dataset`] – A fact graph that forwards each new triple to its store.
//! * [`interface`] – A single-writer queue for hosts with several producers.
//! * [`ntriples`] – A small N-Triples reader.
//! * [`settings`] – Layered configuration for the `metastate` binary.
//!
//! ## Quick Start
//! ```
//! use metastate::{dataset::Dataset, ruleset::SchemaRuleset, ntriples};
//! use metastate::classification::Classifications;
//! use metastate::store::MetaBase;
//! use metastate::term::named;
//!
//! let schema = ntriples::parse_graph(
//!     "<http://example.org/Student> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/Person> .",
//! ).unwrap();
//! let ruleset = SchemaRuleset::new(&schema);
//! let mut dataset = Dataset::new(&ruleset);
//! dataset.extend(&ntriples::parse(
//!     "<http://example.org/alice> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Student> .",
//! ).unwrap());
//! let alice = named("http://example.org/alice").unwrap();
//! assert!(dataset.store().types().contains(&alice, &named("http://example.org/Person").unwrap()));
//! assert!(dataset.store().shapes().get_all(&alice).is_empty());
//! ```

pub mod classification;
pub mod dataset;
pub mod error;
pub mod interface;
pub mod ntriples;
pub mod ruleset;
pub mod settings;
pub mod store;
pub mod term;
