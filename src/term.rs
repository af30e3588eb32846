//! Term identity support.
//!
//! Resources and classifiers are plain [`oxrdf::Term`] values. Their `Eq` and
//! `Hash` implementations are structural: two terms are equal when they have
//! the same kind and the same value (IRI, blank node label, or lexical form
//! plus datatype and language tag), no matter which instance they came from.
//! This is what the classification sets deduplicate on.

use core::hash::BuildHasherDefault;
use std::collections::{HashMap, HashSet};

use oxrdf::{BlankNode, Literal, NamedNode, NamedNodeRef, Term};
use seahash::SeaHasher;

use crate::error::{MetastateError, Result};

// ------------- Hashing -------------
pub type TermHasher = BuildHasherDefault<SeaHasher>;

/// Deduplicated, unordered set of classifiers.
pub type TermSet = HashSet<Term, TermHasher>;
pub type TermMap<V> = HashMap<Term, V, TermHasher>;

// ------------- Construction -------------
/// Builds a named node term, rejecting malformed IRIs.
pub fn named(iri: &str) -> Result<Term> {
    NamedNode::new(iri)
        .map(Term::from)
        .map_err(|e| MetastateError::Term(format!("<{iri}>: {e}")))
}

/// Builds a blank node term from its label (without the `_:` prefix).
pub fn blank(label: &str) -> Result<Term> {
    BlankNode::new(label)
        .map(Term::from)
        .map_err(|e| MetastateError::Term(format!("_:{label}: {e}")))
}

/// Builds a literal term. A language tag takes precedence over a datatype.
pub fn literal(value: &str, datatype: Option<&str>, language: Option<&str>) -> Result<Term> {
    let literal = match (language, datatype) {
        (Some(language), _) => Literal::new_language_tagged_literal(value, language)
            .map_err(|e| MetastateError::Term(format!("\"{value}\"@{language}: {e}")))?,
        (None, Some(datatype)) => {
            let datatype = NamedNode::new(datatype)
                .map_err(|e| MetastateError::Term(format!("<{datatype}>: {e}")))?;
            Literal::new_typed_literal(value, datatype)
        }
        (None, None) => Literal::new_simple_literal(value),
    };
    Ok(Term::from(literal))
}

/// Owned term for a vocabulary constant.
pub fn iri(node: NamedNodeRef<'_>) -> Term {
    Term::from(node.into_owned())
}

pub fn is_literal(term: &Term) -> bool {
    matches!(term, Term::Literal(_))
}

// ------------- Vocabulary -------------
pub mod rdf {
    use oxrdf::NamedNodeRef;

    pub const TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
}

pub mod rdfs {
    use oxrdf::NamedNodeRef;

    pub const CLASS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#Class");
    pub const RESOURCE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#Resource");
    pub const SUB_CLASS_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");
    pub const DOMAIN: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#domain");
    pub const RANGE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#range");
}

pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const CLASS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
}

pub mod sh {
    use oxrdf::NamedNodeRef;

    pub const NODE_SHAPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#NodeShape");
    pub const TARGET_CLASS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#targetClass");
    pub const TARGET_NODE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#targetNode");
    pub const TARGET_SUBJECTS_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#targetSubjectsOf");
    pub const TARGET_OBJECTS_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#targetObjectsOf");
    pub const PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#property");
    pub const PATH: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#path");
    pub const NODE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#node");
}
