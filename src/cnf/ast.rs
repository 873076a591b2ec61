//! Data model for parsed configuration files

pub mod node;
pub mod position;
pub mod tree;

pub use node::{CommentNode, ConfigNode, KeyValueNode, SectionNode};
pub use position::{Position, PositionedText, SourceLocation};
pub use tree::ConfigurationTree;
