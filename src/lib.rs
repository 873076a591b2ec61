//! # cnf
//!
//! A parser and query engine for MySQL-style configuration files.
//!
//! Raw text goes through the grammar into a position-annotated
//! configuration tree, the tree is lowered into an attributed document,
//! `!include`/`!includedir` directives are resolved recursively with their
//! content spliced into the parent document, and path queries plus derived
//! statistics run read-only over the merged result.

pub mod cnf;

pub use cnf::ast::{
    CommentNode, ConfigNode, ConfigurationTree, KeyValueNode, Position, PositionedText,
    SectionNode,
};
pub use cnf::document::{Document, Element};
pub use cnf::file::ConfigurationFile;
pub use cnf::fs::{FileSystem, LocalFileSystem};
pub use cnf::grammar::{parse_tree, unescape, SyntaxError, DIALECT};
pub use cnf::includes::IncludeRecord;
pub use cnf::query::{evaluate, QueryOutcome};
pub use cnf::stats::Statistics;
