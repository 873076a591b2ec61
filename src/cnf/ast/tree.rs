//! The parse result for a single configuration file

use serde::Serialize;

use super::node::{ConfigNode, SectionNode};

/// The full parse of one configuration file
///
/// Holds the dialect name and the top-level node sequence: leading
/// keys/comments before the first section, then sections, in source order.
/// Produced once per successfully parsed file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationTree {
    pub dialect: String,
    pub nodes: Vec<ConfigNode>,
}

impl ConfigurationTree {
    pub fn new(dialect: impl Into<String>, nodes: Vec<ConfigNode>) -> Self {
        Self {
            dialect: dialect.into(),
            nodes,
        }
    }

    /// Top-level sections, in source order
    pub fn sections(&self) -> impl Iterator<Item = &SectionNode> {
        self.nodes.iter().filter_map(ConfigNode::as_section)
    }
}
