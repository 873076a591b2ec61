//! Step-wise evaluation of path queries over a document
//!
//! Element steps narrow a node set starting from the (virtual) document
//! node; a trailing attribute or `text()` step projects the surviving
//! elements to strings. Elements render as their text when they have any,
//! otherwise as their name.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::cnf::document::{Document, Element};

use super::parser::{parse_query, Axis, NodeTest, PathQuery, Predicate, Step};

/// The outcome for one expression of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub matched: bool,
    pub results: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Evaluate a batch of expressions against a merged document
///
/// Expressions form a set: duplicates collapse into one entry, and outcomes
/// keep first-seen order. A failing expression never aborts the rest.
pub fn evaluate<S: AsRef<str>>(
    document: &Document,
    expressions: &[S],
) -> IndexMap<String, QueryOutcome> {
    let mut outcomes = IndexMap::new();
    for expression in expressions {
        let expression = expression.as_ref();
        if outcomes.contains_key(expression) {
            continue;
        }
        outcomes.insert(expression.to_string(), evaluate_one(document, expression));
    }
    outcomes
}

/// Evaluate a single expression
pub fn evaluate_one(document: &Document, expression: &str) -> QueryOutcome {
    match parse_query(expression) {
        Err(error) => QueryOutcome {
            matched: false,
            results: Vec::new(),
            error: Some(error.to_string()),
        },
        Ok(query) => {
            let results = run(document, &query);
            QueryOutcome {
                matched: !results.is_empty(),
                results,
                error: None,
            }
        }
    }
}

fn run(document: &Document, query: &PathQuery) -> Vec<String> {
    let root = &document.root;

    // A trailing attribute/text() step projects to strings; everything
    // before it narrows the element node set
    let (element_steps, terminal) = match query.steps.split_last() {
        Some((last, rest)) if matches!(last.test, NodeTest::Attribute(_) | NodeTest::Text) => {
            (rest, Some(last))
        }
        _ => (query.steps.as_slice(), None),
    };

    // An absolute path starts at the virtual document node, whose only
    // child is the root element; a relative path starts at the root itself
    let mut at_document_node = query.absolute;
    let mut current: Vec<&Element> = if at_document_node {
        Vec::new()
    } else {
        vec![root]
    };

    for step in element_steps {
        if at_document_node {
            current = apply_from_document(root, step);
            at_document_node = false;
        } else {
            current = apply(&current, step);
        }
    }

    match terminal {
        None => current.iter().map(|e| render(e)).collect(),
        Some(step) => {
            let owners: Vec<&Element> = if at_document_node {
                match step.axis {
                    Axis::Child => Vec::new(),
                    Axis::Descendant => std::iter::once(root).chain(root.descendants()).collect(),
                }
            } else {
                match step.axis {
                    Axis::Child => current,
                    Axis::Descendant => {
                        let mut owners = Vec::new();
                        for node in &current {
                            owners.push(*node);
                            owners.extend(node.descendants());
                        }
                        dedup_by_identity(owners)
                    }
                }
            };

            match &step.test {
                NodeTest::Attribute(name) => owners
                    .iter()
                    .filter_map(|e| e.attr(name))
                    .map(str::to_string)
                    .collect(),
                NodeTest::Text => owners.iter().filter_map(|e| e.text.clone()).collect(),
                _ => Vec::new(),
            }
        }
    }
}

fn apply<'a>(context: &[&'a Element], step: &Step) -> Vec<&'a Element> {
    let mut out = Vec::new();
    for node in context {
        let candidates: Vec<&Element> = match step.axis {
            Axis::Child => node
                .children
                .iter()
                .filter(|c| test_matches(&step.test, c))
                .collect(),
            Axis::Descendant => node
                .descendants()
                .filter(|c| test_matches(&step.test, c))
                .collect(),
        };
        out.extend(apply_predicates(candidates, &step.predicates));
    }
    dedup_by_identity(out)
}

fn apply_from_document<'a>(root: &'a Element, step: &Step) -> Vec<&'a Element> {
    let candidates: Vec<&Element> = match step.axis {
        Axis::Child => std::iter::once(root)
            .filter(|e| test_matches(&step.test, e))
            .collect(),
        Axis::Descendant => std::iter::once(root)
            .chain(root.descendants())
            .filter(|e| test_matches(&step.test, e))
            .collect(),
    };
    apply_predicates(candidates, &step.predicates)
}

/// Predicates filter the candidate list per context node, in order;
/// positional predicates are 1-based
fn apply_predicates<'a>(
    mut candidates: Vec<&'a Element>,
    predicates: &[Predicate],
) -> Vec<&'a Element> {
    for predicate in predicates {
        candidates = match predicate {
            Predicate::AttributeEquals { name, value } => candidates
                .into_iter()
                .filter(|e| e.attr(name) == Some(value.as_str()))
                .collect(),
            Predicate::Position(n) => {
                if *n >= 1 && *n <= candidates.len() {
                    vec![candidates[*n - 1]]
                } else {
                    Vec::new()
                }
            }
        };
    }
    candidates
}

fn test_matches(test: &NodeTest, element: &Element) -> bool {
    match test {
        NodeTest::Name(name) => element.name == *name,
        NodeTest::Wildcard => true,
        NodeTest::Attribute(_) | NodeTest::Text => false,
    }
}

fn dedup_by_identity<'a>(nodes: Vec<&'a Element>) -> Vec<&'a Element> {
    let mut seen: HashSet<*const Element> = HashSet::new();
    nodes
        .into_iter()
        .filter(|e| seen.insert(*e as *const Element))
        .collect()
}

fn render(element: &Element) -> String {
    match &element.text {
        Some(text) => text.clone(),
        None => element.name.clone(),
    }
}
