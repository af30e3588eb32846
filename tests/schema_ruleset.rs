use metastate::classification::Classifications;
use metastate::dataset::Dataset;
use metastate::ntriples;
use metastate::ruleset::SchemaRuleset;
use metastate::settings::{AxiomSetting, RulesetSettings};
use metastate::store::{MetaBase, Namespace};
use metastate::term::{iri, named, rdfs};
use oxrdf::Term;

const PREFIXES: &[(&str, &str)] = &[
    ("ex:", "http://example.org/"),
    ("rdf:", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs:", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl:", "http://www.w3.org/2002/07/owl#"),
    ("sh:", "http://www.w3.org/ns/shacl#"),
];

/// Expands `ex:a rdf:type ex:B` shorthand lines into N-Triples.
fn nt(lines: &str) -> String {
    let mut document = String::new();
    for line in lines.lines().map(str::trim).filter(|l| !l.is_empty()) {
        for token in line.split_whitespace() {
            let expanded = PREFIXES
                .iter()
                .find_map(|(prefix, ns)| token.strip_prefix(prefix).map(|local| format!("<{ns}{local}>")))
                .unwrap_or_else(|| token.to_string());
            document.push_str(&expanded);
            document.push(' ');
        }
        document.push_str(".\n");
    }
    document
}

fn ruleset(schema: &str) -> SchemaRuleset {
    SchemaRuleset::new(&ntriples::parse_graph(&nt(schema)).unwrap())
}

fn ingest(dataset: &mut Dataset<'_>, data: &str) {
    dataset.extend(&ntriples::parse(&nt(data)).unwrap());
}

fn ex(local: &str) -> Term {
    named(&format!("http://example.org/{local}")).unwrap()
}

fn sorted(dataset: &Dataset<'_>, namespace: Namespace, resource: &str) -> Vec<String> {
    let mut classifiers: Vec<String> = dataset
        .store()
        .namespace(namespace)
        .get_all(&ex(resource))
        .iter()
        .map(ToString::to_string)
        .collect();
    classifiers.sort();
    classifiers
}

fn types(dataset: &Dataset<'_>, resource: &str) -> Vec<String> {
    sorted(dataset, Namespace::Types, resource)
}

fn shapes(dataset: &Dataset<'_>, resource: &str) -> Vec<String> {
    sorted(dataset, Namespace::Shapes, resource)
}

fn names(locals: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = locals.iter().map(|l| format!("<http://example.org/{l}>")).collect();
    names.sort();
    names
}

#[test]
fn subclass_closure_is_transitive() {
    let ruleset = ruleset(
        "ex:Student rdfs:subClassOf ex:Person
         ex:Person rdfs:subClassOf ex:Agent",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:alice rdf:type ex:Student");
    assert_eq!(types(&dataset, "alice"), names(&["Student", "Person", "Agent"]));
    assert!(shapes(&dataset, "alice").is_empty());
}

#[test]
fn cyclic_subclasses_settle() {
    let ruleset = ruleset(
        "ex:A rdfs:subClassOf ex:B
         ex:B rdfs:subClassOf ex:C
         ex:C rdfs:subClassOf ex:A",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:x rdf:type ex:B");
    assert_eq!(types(&dataset, "x"), names(&["A", "B", "C"]));
}

#[test]
fn domain_and_range_type_both_ends() {
    let ruleset = ruleset(
        "ex:teaches rdfs:domain ex:Teacher
         ex:teaches rdfs:range ex:Course
         ex:Teacher rdfs:subClassOf ex:Person",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:bob ex:teaches ex:logic");
    assert_eq!(types(&dataset, "bob"), names(&["Teacher", "Person"]));
    assert_eq!(types(&dataset, "logic"), names(&["Course"]));
}

#[test]
fn range_skips_literal_objects() {
    let ruleset = ruleset("ex:name rdfs:range ex:Name");
    let mut dataset = Dataset::new(&ruleset);
    dataset.extend(&ntriples::parse(r#"<http://example.org/bob> <http://example.org/name> "Bob" ."#).unwrap());
    let literal = metastate::term::literal("Bob", None, None).unwrap();
    assert!(dataset.store().types().get_all(&literal).is_empty());
    assert!(dataset.store().type_set().is_empty());
}

#[test]
fn target_class_follows_inferred_types() {
    let ruleset = ruleset(
        "ex:Student rdfs:subClassOf ex:Person
         ex:PersonShape rdf:type sh:NodeShape
         ex:PersonShape sh:targetClass ex:Person",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:alice rdf:type ex:Student");
    assert_eq!(shapes(&dataset, "alice"), names(&["PersonShape"]));
}

#[test]
fn implicit_class_target() {
    let ruleset = ruleset(
        "ex:Person rdf:type rdfs:Class
         ex:Person rdf:type sh:NodeShape",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:alice rdf:type ex:Person");
    assert_eq!(shapes(&dataset, "alice"), names(&["Person"]));
}

#[test]
fn subjects_and_objects_of_targets() {
    let ruleset = ruleset(
        "ex:KnowerShape sh:targetSubjectsOf ex:knows
         ex:KnownShape sh:targetObjectsOf ex:knows",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:alice ex:knows ex:bob");
    assert_eq!(shapes(&dataset, "alice"), names(&["KnowerShape"]));
    assert_eq!(shapes(&dataset, "bob"), names(&["KnownShape"]));
    assert!(types(&dataset, "alice").is_empty());
}

#[test]
fn target_nodes_are_axioms() {
    let ruleset = ruleset("ex:RootShape sh:targetNode ex:root");
    let dataset = Dataset::new(&ruleset);
    assert!(dataset.is_empty());
    assert_eq!(shapes(&dataset, "root"), names(&["RootShape"]));
}

#[test]
fn node_links_chain_shapes() {
    let ruleset = ruleset(
        "ex:StudentShape sh:targetClass ex:Student
         ex:StudentShape sh:node ex:PersonShape",
    );
    let mut dataset = Dataset::new(&ruleset);
    ingest(&mut dataset, "ex:alice rdf:type ex:Student");
    assert_eq!(shapes(&dataset, "alice"), names(&["StudentShape", "PersonShape"]));
}

const ADDRESS_SCHEMA: &str = "
    ex:PersonShape sh:targetClass ex:Person
    ex:PersonShape sh:property ex:addressProperty
    ex:addressProperty sh:path ex:address
    ex:addressProperty sh:node ex:AddressShape
    ex:AddressShape sh:property ex:cityProperty
    ex:cityProperty sh:path ex:city
    ex:cityProperty sh:node ex:CityShape
";

#[test]
fn property_shapes_propagate_along_paths() {
    let ruleset = ruleset(ADDRESS_SCHEMA);
    let mut dataset = Dataset::new(&ruleset);
    ingest(
        &mut dataset,
        "ex:alice rdf:type ex:Person
         ex:alice ex:address ex:home
         ex:home ex:city ex:paris
         ex:alice ex:city ex:nowhere",
    );
    assert_eq!(shapes(&dataset, "home"), names(&["AddressShape"]));
    assert_eq!(shapes(&dataset, "paris"), names(&["CityShape"]));
    assert!(shapes(&dataset, "nowhere").is_empty());
}

#[test]
fn property_shapes_do_not_depend_on_arrival_order() {
    let ruleset = ruleset(ADDRESS_SCHEMA);
    let mut forward = Dataset::new(&ruleset);
    ingest(
        &mut forward,
        "ex:alice rdf:type ex:Person
         ex:alice ex:address ex:home
         ex:home ex:city ex:paris",
    );
    let mut backward = Dataset::new(&ruleset);
    ingest(
        &mut backward,
        "ex:home ex:city ex:paris
         ex:alice ex:address ex:home
         ex:alice rdf:type ex:Person",
    );
    assert_eq!(forward.store().snapshot(), backward.store().snapshot());
}

#[test]
fn rule_families_can_be_disabled() {
    let schema = ntriples::parse_graph(&nt(
        "ex:Student rdfs:subClassOf ex:Person
         ex:StudentShape sh:targetClass ex:Student",
    ))
    .unwrap();

    let types_only = SchemaRuleset::compile(
        &schema,
        &RulesetSettings { shacl: false, ..RulesetSettings::default() },
    )
    .unwrap();
    let mut dataset = Dataset::new(&types_only);
    ingest(&mut dataset, "ex:alice rdf:type ex:Student");
    assert_eq!(types(&dataset, "alice"), names(&["Student", "Person"]));
    assert!(shapes(&dataset, "alice").is_empty());

    let shapes_only = SchemaRuleset::compile(
        &schema,
        &RulesetSettings { rdfs: false, ..RulesetSettings::default() },
    )
    .unwrap();
    let mut dataset = Dataset::new(&shapes_only);
    ingest(&mut dataset, "ex:alice rdf:type ex:Student");
    // explicit rdf:type statements are always recorded
    assert_eq!(types(&dataset, "alice"), names(&["Student"]));
    assert_eq!(shapes(&dataset, "alice"), names(&["StudentShape"]));
}

#[test]
fn configured_axioms_are_seeded_and_propagate() {
    let schema = ntriples::parse_graph(&nt("ex:Thing rdfs:subClassOf rdfs:Resource")).unwrap();
    let settings = RulesetSettings {
        axioms: vec![AxiomSetting {
            namespace: Namespace::Types,
            resource: "http://example.org/root".into(),
            classifier: "http://example.org/Thing".into(),
        }],
        ..RulesetSettings::default()
    };
    let ruleset = SchemaRuleset::compile(&schema, &settings).unwrap();
    let dataset = Dataset::new(&ruleset);
    assert!(dataset.store().types().contains(&ex("root"), &iri(rdfs::RESOURCE)));
    assert_eq!(ruleset.super_classes(&ex("Thing")), &[iri(rdfs::RESOURCE)]);
}

#[test]
fn malformed_axiom_fails_compilation() {
    let settings = RulesetSettings {
        axioms: vec![AxiomSetting {
            namespace: Namespace::Shapes,
            resource: "not an iri".into(),
            classifier: "http://example.org/Shape".into(),
        }],
        ..RulesetSettings::default()
    };
    assert!(SchemaRuleset::compile(&oxrdf::Graph::new(), &settings).is_err());
}

#[test]
fn builder_axioms() {
    let ruleset = SchemaRuleset::default().with_axiom(Namespace::Shapes, ex("root"), ex("RootShape"));
    let dataset = Dataset::new(&ruleset);
    assert_eq!(shapes(&dataset, "root"), names(&["RootShape"]));
    assert!(types(&dataset, "root").is_empty());
}
