//! Minimal N-Triples reader used to feed schemas and data into a dataset.
//!
//! The grammar lives in `ntriples.pest`. Terms are validated by the term
//! model as they are built, so a malformed IRI or language tag is reported
//! with the position of the offending triple.

use std::fs;
use std::path::Path;

use oxrdf::{BlankNode, Graph, NamedNode, Term, Triple};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::error::{MetastateError, Result};
use crate::term;

#[derive(Parser)]
#[grammar = "ntriples.pest"]
struct NTriplesParser;

enum Node {
    Named(NamedNode),
    Blank(BlankNode),
}

/// Parses an N-Triples document into triples, in document order.
pub fn parse(input: &str) -> Result<Vec<Triple>> {
    let document = NTriplesParser::parse(Rule::document, input)?
        .next()
        .ok_or_else(|| MetastateError::Parse { message: "empty document".into(), line: None, col: None })?;
    let mut triples = Vec::new();
    for pair in document.into_inner() {
        if pair.as_rule() == Rule::triple {
            triples.push(parse_triple(pair)?);
        }
    }
    Ok(triples)
}

pub fn read(path: &Path) -> Result<Vec<Triple>> {
    let input = fs::read_to_string(path)
        .map_err(|e| MetastateError::Io(format!("{}: {e}", path.display())))?;
    parse(&input)
}

/// Parses a document straight into a graph, dropping duplicate triples.
pub fn parse_graph(input: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for triple in parse(input)? {
        graph.insert(&triple);
    }
    Ok(graph)
}

fn parse_triple(pair: Pair<'_, Rule>) -> Result<Triple> {
    let (line, col) = pair.as_span().start_pos().line_col();
    let at = |e: MetastateError| match e {
        MetastateError::Term(message) => MetastateError::Parse { message, line: Some(line), col: Some(col) },
        other => other,
    };
    let mut parts = pair.into_inner();
    let (Some(subject), Some(predicate), Some(object)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MetastateError::Parse { message: "incomplete triple".into(), line: Some(line), col: Some(col) });
    };
    let subject = parse_node(subject).map_err(at)?;
    let predicate = parse_iri(predicate).map_err(at)?;
    let object = parse_object(object).map_err(at)?;
    Ok(match subject {
        Node::Named(node) => Triple::new(node, predicate, object),
        Node::Blank(node) => Triple::new(node, predicate, object),
    })
}

fn parse_node(pair: Pair<'_, Rule>) -> Result<Node> {
    match pair.as_rule() {
        Rule::blank_node => Ok(Node::Blank(parse_blank(pair)?)),
        _ => Ok(Node::Named(parse_iri(pair)?)),
    }
}

fn parse_iri(pair: Pair<'_, Rule>) -> Result<NamedNode> {
    let raw = pair.into_inner().as_str();
    let body = unescape_iri(raw)?;
    NamedNode::new(body).map_err(|e| MetastateError::Term(format!("<{raw}>: {e}")))
}

fn parse_blank(pair: Pair<'_, Rule>) -> Result<BlankNode> {
    let label = pair.into_inner().as_str();
    BlankNode::new(label).map_err(|e| MetastateError::Term(format!("_:{label}: {e}")))
}

fn parse_object(pair: Pair<'_, Rule>) -> Result<Term> {
    match pair.as_rule() {
        Rule::literal => {
            let mut inner = pair.into_inner();
            let value = inner.next().map(|string| unescape(string.into_inner().as_str())).transpose()?;
            let value = value.unwrap_or_default();
            match inner.next() {
                Some(tag) if tag.as_rule() == Rule::language => {
                    term::literal(&value, None, Some(tag.as_str()))
                }
                Some(datatype) => {
                    let datatype = parse_iri(datatype)?;
                    term::literal(&value, Some(datatype.as_str()), None)
                }
                None => term::literal(&value, None, None),
            }
        }
        Rule::blank_node => Ok(parse_blank(pair)?.into()),
        _ => Ok(parse_iri(pair)?.into()),
    }
}

fn unescape(raw: &str) -> Result<String> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('t') => '\t',
            Some('b') => '\u{8}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\u{c}',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('u') => code_point(&mut chars, 4)?,
            Some('U') => code_point(&mut chars, 8)?,
            other => {
                return Err(MetastateError::Term(format!("invalid escape \\{}", other.unwrap_or(' '))));
            }
        };
        value.push(escaped);
    }
    Ok(value)
}

/// IRIs only admit numeric escapes.
fn unescape_iri(raw: &str) -> Result<String> {
    if !raw.contains('\\') {
        return Ok(raw.to_owned());
    }
    let mut iri = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            iri.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => iri.push(code_point(&mut chars, 4)?),
            Some('U') => iri.push(code_point(&mut chars, 8)?),
            other => {
                return Err(MetastateError::Term(format!(
                    "invalid IRI escape \\{}",
                    other.unwrap_or(' ')
                )));
            }
        }
    }
    Ok(iri)
}

fn code_point(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char> {
    let hex: String = chars.take(digits).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == digits)
        .and_then(char::from_u32)
        .ok_or_else(|| MetastateError::Term(format!("invalid code point \\u{hex}")))
}
