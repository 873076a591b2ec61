//! Grammar for the MySQL-style configuration dialect
//!
//! [`parse_tree`] turns raw file text into a [`ConfigurationTree`] or a
//! [`SyntaxError`] carrying the exact offending position and an expectation
//! description. The rules live in `rules`, built from the character-level
//! primitives in `primitives`.
//!
//! [`ConfigurationTree`]: crate::cnf::ast::ConfigurationTree

mod primitives;
mod rules;
pub mod unescape;


pub use rules::{parse_tree, DIALECT};
pub use unescape::unescape;

use thiserror::Error;

use crate::cnf::ast::{Position, SourceLocation};

/// A positioned parse failure
///
/// `expected` describes the alternatives the grammar would have accepted at
/// the failure point; `found` is the offending input, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at {position}: unexpected {found}, expected {expected}")]
pub struct SyntaxError {
    pub position: Position,
    pub expected: String,
    pub found: String,
}

impl SyntaxError {
    pub(crate) fn from_parse_errors(
        errors: Vec<chumsky::error::Simple<char>>,
        loc: &SourceLocation,
    ) -> Self {
        // Report the error that made it furthest through the input
        let error = errors.into_iter().max_by_key(|e| e.span().start);
        let Some(error) = error else {
            return SyntaxError {
                position: Position::new(1, 1),
                expected: "configuration input".to_string(),
                found: "nothing".to_string(),
            };
        };

        let mut expected: Vec<String> = error
            .expected()
            .map(|e| match e {
                Some(c) => format!("'{}'", c.escape_default()),
                None => "end of input".to_string(),
            })
            .collect();
        expected.sort();
        expected.dedup();
        let expected = if expected.is_empty() {
            "valid configuration syntax".to_string()
        } else {
            expected.join(" or ")
        };

        let found = match error.found() {
            Some(c) => format!("'{}'", c.escape_default()),
            None => "end of input".to_string(),
        };

        SyntaxError {
            position: loc.byte_to_position(error.span().start),
            expected,
            found,
        }
    }
}
