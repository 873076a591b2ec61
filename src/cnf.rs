//! Core modules for configuration parsing, include resolution and queries

pub mod ast;
pub mod document;
pub mod file;
pub mod fs;
pub mod grammar;
pub mod includes;
pub mod query;
pub mod stats;
