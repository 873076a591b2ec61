//! Node type definitions for parsed configuration content
//!
//! A configuration file is a flat sequence of keys, comments and sections;
//! sections in turn hold keys and comments. Consumers match on [`ConfigNode`]
//! exhaustively.

use serde::Serialize;

use super::position::PositionedText;

/// A single parsed configuration node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigNode {
    KeyValue(KeyValueNode),
    Comment(CommentNode),
    Section(SectionNode),
}

impl ConfigNode {
    /// The key/value node carried by this node, if it is one
    pub fn as_key_value(&self) -> Option<&KeyValueNode> {
        match self {
            ConfigNode::KeyValue(kv) => Some(kv),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentNode> {
        match self {
            ConfigNode::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&SectionNode> {
        match self {
            ConfigNode::Section(s) => Some(s),
            _ => None,
        }
    }
}

/// A `key = value` pair, a bare boolean key, or an include directive
///
/// Boolean keys synthesize the value `"true"` with zero length. Include
/// directives keep the directive literal (`!include` / `!includedir`) as the
/// key and the declared path as the value; ordinary key names can never start
/// with `!`, so the two spaces do not collide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValueNode {
    pub key: PositionedText,
    pub value: PositionedText,
}

impl KeyValueNode {
    pub fn new(key: PositionedText, value: PositionedText) -> Self {
        Self { key, value }
    }

    /// Whether this node is an `!include`/`!includedir` directive
    pub fn is_directive(&self) -> bool {
        self.key.value.starts_with('!')
    }
}

/// A `;` or `#` comment line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode {
    /// 1-based source line of the comment text
    pub line: usize,
    /// Text after the delimiter; may be empty
    pub text: String,
}

impl CommentNode {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    /// Synthetic display name embedding the source line
    pub fn display_name(&self) -> String {
        format!("Comment {}", self.line)
    }
}

/// A `[name]` section and its keys/comments, in parse order
///
/// Later duplicate keys are kept; order is semantically significant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    pub name: PositionedText,
    pub children: Vec<ConfigNode>,
}

impl SectionNode {
    pub fn new(name: PositionedText, children: Vec<ConfigNode>) -> Self {
        Self { name, children }
    }

    /// Key/value children, skipping comments
    pub fn keys(&self) -> impl Iterator<Item = &KeyValueNode> {
        self.children.iter().filter_map(ConfigNode::as_key_value)
    }

    /// Comment children, skipping keys
    pub fn comments(&self) -> impl Iterator<Item = &CommentNode> {
        self.children.iter().filter_map(ConfigNode::as_comment)
    }
}
