use std::collections::HashSet;

use oxrdf::{Graph, NamedNode, NamedNodeRef, Term, TermRef, Triple};
use tracing::{debug, info};

use crate::error::Result;
use crate::ruleset::Ruleset;
use crate::settings::RulesetSettings;
use crate::store::{MetaBase, Namespace};
use crate::term::{self, TermHasher, TermMap, iri, is_literal, owl, rdf, rdfs, sh};

/// A property shape reachable from a node shape: whatever the focus node
/// reaches through `path` must conform to `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyLink {
    pub path: NamedNode,
    pub node: Term,
}

type Derivation = (Namespace, Term, Term);

// ------------- SchemaRuleset -------------
/// Forward-chaining ruleset compiled from RDFS and SHACL statements.
///
/// Type rules: `rdf:type`, `rdfs:subClassOf`, `rdfs:domain`, `rdfs:range`.
/// Shape rules: `sh:targetNode` (as axioms), `sh:targetClass` including
/// implicit class targets, `sh:targetSubjectsOf`, `sh:targetObjectsOf`, and
/// `sh:node` both directly on a node shape and through `sh:property` /
/// `sh:path` with a single predicate path.
///
/// Every derivation goes through a work list and only spawns further
/// derivations when the store reports it as new, so cyclic schemas settle.
#[derive(Debug, Default)]
pub struct SchemaRuleset {
    rdfs: bool,
    shacl: bool,
    axioms: Vec<Derivation>,
    super_classes: TermMap<Vec<Term>>,
    domains: TermMap<Vec<Term>>,
    ranges: TermMap<Vec<Term>>,
    // class -> shapes targeting its instances
    class_targets: TermMap<Vec<Term>>,
    // predicate -> shapes
    subjects_of_targets: TermMap<Vec<Term>>,
    objects_of_targets: TermMap<Vec<Term>>,
    // (node, shape)
    node_targets: Vec<(Term, Term)>,
    // shape -> shapes its focus nodes must also conform to
    node_links: TermMap<Vec<Term>>,
    property_links: TermMap<Vec<PropertyLink>>,
}

impl SchemaRuleset {
    /// Compiles `schema` with every rule family enabled and no extra axioms.
    pub fn new(schema: &Graph) -> Self {
        Self::index(schema, true, true)
    }
    pub fn compile(schema: &Graph, settings: &RulesetSettings) -> Result<Self> {
        let mut ruleset = Self::index(schema, settings.rdfs, settings.shacl);
        for axiom in &settings.axioms {
            let resource = term::named(&axiom.resource)?;
            let classifier = term::named(&axiom.classifier)?;
            ruleset = ruleset.with_axiom(axiom.namespace, resource, classifier);
        }
        info!(
            rdfs = ruleset.rdfs,
            shacl = ruleset.shacl,
            classes = ruleset.super_classes.len(),
            shapes = ruleset.node_links.len() + ruleset.property_links.len(),
            axioms = ruleset.axioms.len(),
            "ruleset compiled"
        );
        Ok(ruleset)
    }
    /// Adds a classification that is seeded into every store built on this
    /// ruleset.
    pub fn with_axiom(mut self, namespace: Namespace, resource: Term, classifier: Term) -> Self {
        self.axioms.push((namespace, resource, classifier));
        self
    }
    pub fn super_classes(&self, class: &Term) -> &[Term] {
        lookup(&self.super_classes, class)
    }
    pub fn property_links(&self, shape: &Term) -> &[PropertyLink] {
        lookup(&self.property_links, shape)
    }

    fn index(schema: &Graph, rdfs_rules: bool, shacl_rules: bool) -> Self {
        let mut ruleset = Self { rdfs: rdfs_rules, shacl: shacl_rules, ..Self::default() };
        let mut classes = HashSet::<Term, TermHasher>::default();
        let mut node_shapes = HashSet::<Term, TermHasher>::default();
        let mut properties: TermMap<Vec<Term>> = TermMap::default();
        let mut paths: TermMap<NamedNode> = TermMap::default();
        let mut nodes: TermMap<Vec<Term>> = TermMap::default();

        for triple in schema.iter() {
            let subject = TermRef::from(triple.subject).into_owned();
            let object = triple.object.into_owned();
            let predicate = triple.predicate;
            if predicate == rdf::TYPE {
                if object == iri(rdfs::CLASS) || object == iri(owl::CLASS) {
                    classes.insert(subject);
                } else if object == iri(sh::NODE_SHAPE) {
                    node_shapes.insert(subject);
                }
            } else if predicate == rdfs::SUB_CLASS_OF {
                ruleset.super_classes.entry(subject).or_default().push(object);
            } else if predicate == rdfs::DOMAIN {
                ruleset.domains.entry(subject).or_default().push(object);
            } else if predicate == rdfs::RANGE {
                ruleset.ranges.entry(subject).or_default().push(object);
            } else if predicate == sh::TARGET_CLASS {
                ruleset.class_targets.entry(object).or_default().push(subject);
            } else if predicate == sh::TARGET_NODE {
                ruleset.node_targets.push((object, subject));
            } else if predicate == sh::TARGET_SUBJECTS_OF {
                ruleset.subjects_of_targets.entry(object).or_default().push(subject);
            } else if predicate == sh::TARGET_OBJECTS_OF {
                ruleset.objects_of_targets.entry(object).or_default().push(subject);
            } else if predicate == sh::PROPERTY {
                properties.entry(subject).or_default().push(object);
            } else if predicate == sh::PATH {
                // only predicate paths, sequence and inverse paths are not followed
                if let Term::NamedNode(path) = object {
                    paths.insert(subject, path);
                }
            } else if predicate == sh::NODE {
                nodes.entry(subject).or_default().push(object);
            }
        }

        // a class that is also a node shape targets its own instances
        for class in classes.intersection(&node_shapes) {
            ruleset.class_targets.entry(class.clone()).or_default().push(class.clone());
        }
        for (shape, property_shapes) in &properties {
            for property_shape in property_shapes {
                let Some(path) = paths.get(property_shape) else {
                    continue;
                };
                for node in lookup(&nodes, property_shape) {
                    ruleset.property_links.entry(shape.clone()).or_default().push(PropertyLink {
                        path: path.clone(),
                        node: node.clone(),
                    });
                }
            }
        }
        for (shape, targets) in nodes {
            if !paths.contains_key(&shape) {
                ruleset.node_links.insert(shape, targets);
            }
        }
        ruleset
    }

    fn derive(&self, mut pending: Vec<Derivation>, dataset: &Graph, meta: &mut dyn MetaBase) {
        while let Some((namespace, resource, classifier)) = pending.pop() {
            if !meta.namespace_mut(namespace).add(&resource, &classifier) {
                continue;
            }
            debug!(?namespace, %resource, %classifier, "derived");
            match namespace {
                Namespace::Types => self.on_new_type(&resource, &classifier, &mut pending),
                Namespace::Shapes => {
                    self.on_new_shape(&resource, &classifier, dataset, &mut pending)
                }
            }
        }
    }

    fn on_new_type(&self, resource: &Term, class: &Term, pending: &mut Vec<Derivation>) {
        if self.rdfs {
            for super_class in lookup(&self.super_classes, class) {
                pending.push((Namespace::Types, resource.clone(), super_class.clone()));
            }
        }
        if self.shacl {
            for shape in lookup(&self.class_targets, class) {
                pending.push((Namespace::Shapes, resource.clone(), shape.clone()));
            }
        }
    }

    fn on_new_shape(
        &self,
        resource: &Term,
        shape: &Term,
        dataset: &Graph,
        pending: &mut Vec<Derivation>,
    ) {
        if !self.shacl {
            return;
        }
        for node in lookup(&self.node_links, shape) {
            pending.push((Namespace::Shapes, resource.clone(), node.clone()));
        }
        // triples observed before the shape was known still propagate it
        for link in lookup(&self.property_links, shape) {
            for object in objects(dataset, resource, link.path.as_ref()) {
                pending.push((Namespace::Shapes, object, link.node.clone()));
            }
        }
    }
}

impl Ruleset for SchemaRuleset {
    fn add_axioms(&self, meta: &mut dyn MetaBase) {
        let mut pending = self.axioms.clone();
        if self.shacl {
            for (node, shape) in &self.node_targets {
                pending.push((Namespace::Shapes, node.clone(), shape.clone()));
            }
        }
        self.derive(pending, &Graph::new(), meta);
    }

    fn on_new_triple(&self, triple: &Triple, dataset: &Graph, meta: &mut dyn MetaBase) {
        let subject = Term::from(triple.subject.clone());
        let predicate = Term::from(triple.predicate.clone());
        let object = &triple.object;
        let mut pending = Vec::new();

        if triple.predicate == rdf::TYPE && !is_literal(object) {
            pending.push((Namespace::Types, subject.clone(), object.clone()));
        }
        if self.rdfs {
            for domain in lookup(&self.domains, &predicate) {
                pending.push((Namespace::Types, subject.clone(), domain.clone()));
            }
            if !is_literal(object) {
                for range in lookup(&self.ranges, &predicate) {
                    pending.push((Namespace::Types, object.clone(), range.clone()));
                }
            }
        }
        if self.shacl {
            for shape in lookup(&self.subjects_of_targets, &predicate) {
                pending.push((Namespace::Shapes, subject.clone(), shape.clone()));
            }
            for shape in lookup(&self.objects_of_targets, &predicate) {
                pending.push((Namespace::Shapes, object.clone(), shape.clone()));
            }
            for shape in meta.shapes().get_all(&subject) {
                for link in lookup(&self.property_links, shape) {
                    if link.path == triple.predicate {
                        pending.push((Namespace::Shapes, object.clone(), link.node.clone()));
                    }
                }
            }
        }
        self.derive(pending, dataset, meta);
    }
}

fn lookup<'a, V>(map: &'a TermMap<Vec<V>>, key: &Term) -> &'a [V] {
    map.get(key).map(Vec::as_slice).unwrap_or(&[])
}

fn objects(dataset: &Graph, subject: &Term, predicate: NamedNodeRef<'_>) -> Vec<Term> {
    match subject {
        Term::NamedNode(node) => dataset
            .objects_for_subject_predicate(node.as_ref(), predicate)
            .map(TermRef::into_owned)
            .collect(),
        Term::BlankNode(node) => dataset
            .objects_for_subject_predicate(node.as_ref(), predicate)
            .map(TermRef::into_owned)
            .collect(),
        _ => Vec::new(),
    }
}
