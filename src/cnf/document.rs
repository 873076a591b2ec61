//! Attributed document tree derived from a configuration parse tree
//!
//! Every element carries a `File` attribute naming the origin file's short
//! name; keys and comments also carry a 1-based `Line`. The document is the
//! substrate for path queries and statistics: it is computed once while a
//! configuration file is constructed and never mutated afterwards.

use indexmap::IndexMap;
use serde::Serialize;

use super::ast::{ConfigNode, ConfigurationTree};

/// Attribute naming the origin file's short name
pub const ATTR_FILE: &str = "File";
/// Attribute carrying the 1-based source line
pub const ATTR_LINE: &str = "Line";

/// Structural role of a document element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Root,
    Section,
    Key,
    Comment,
}

/// One node of the attributed tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Origin file short name, if tagged
    pub fn file(&self) -> Option<&str> {
        self.attr(ATTR_FILE)
    }

    /// 1-based source line, if tagged
    pub fn line(&self) -> Option<usize> {
        self.attr(ATTR_LINE).and_then(|v| v.parse().ok())
    }

    /// All elements below this one, depth-first, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Depth-first iterator over an element's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// The attributed tree for one file, plus any merged-in include content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Lower a parse tree into an attributed document
    ///
    /// Include directives are not lowered; the include resolver consumes them
    /// and splices the referenced files' content in instead.
    pub fn from_tree(tree: &ConfigurationTree, file_name: &str) -> Document {
        let mut root = Element::new(ElementKind::Root, &tree.dialect);
        root.attributes
            .insert(ATTR_FILE.to_string(), file_name.to_string());

        for node in &tree.nodes {
            if let Some(element) = lower_node(node, file_name) {
                root.children.push(element);
            }
        }

        Document { root }
    }

    /// Append another document's top-level elements to this root
    ///
    /// The appended elements keep their own `File` tags, so statistics can
    /// still distinguish content by origin.
    pub(crate) fn merge_from(&mut self, included: Document) {
        self.root.children.extend(included.root.children);
    }
}

fn lower_node(node: &ConfigNode, file_name: &str) -> Option<Element> {
    match node {
        ConfigNode::KeyValue(kv) if kv.is_directive() => None,
        ConfigNode::KeyValue(kv) => {
            let mut element = Element::new(ElementKind::Key, kv.key.as_str());
            element
                .attributes
                .insert(ATTR_FILE.to_string(), file_name.to_string());
            element
                .attributes
                .insert(ATTR_LINE.to_string(), kv.key.line().to_string());
            element.text = Some(kv.value.value.clone());
            Some(element)
        }
        ConfigNode::Comment(c) => {
            let mut element = Element::new(ElementKind::Comment, "Comment");
            element
                .attributes
                .insert(ATTR_FILE.to_string(), file_name.to_string());
            element
                .attributes
                .insert(ATTR_LINE.to_string(), c.line.to_string());
            element.text = Some(c.text.clone());
            Some(element)
        }
        ConfigNode::Section(s) => {
            let mut element = Element::new(ElementKind::Section, s.name.as_str());
            element
                .attributes
                .insert(ATTR_FILE.to_string(), file_name.to_string());
            for child in &s.children {
                if let Some(lowered) = lower_node(child, file_name) {
                    element.children.push(lowered);
                }
            }
            Some(element)
        }
    }
}
