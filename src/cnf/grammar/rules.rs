//! Grammar rules for the MySQL-style configuration dialect
//!
//! Rules compose the lexical primitives through ordered alternation: the
//! first matching alternative wins, and the order is load-bearing. A valued
//! key must be tried before the bare boolean form, otherwise the boolean
//! rule would swallow the key name of a malformed `key = value` line.

use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

use crate::cnf::ast::{
    CommentNode, ConfigNode, ConfigurationTree, KeyValueNode, Position, PositionedText,
    SectionNode, SourceLocation,
};

use super::primitives::{
    bare_path, bare_value, inline_whitespace, is_key_name_char, is_section_name_char,
    optional_whitespace, positioned_run, quoted_text, required_inline_whitespace, ParserError,
};
use super::SyntaxError;

/// Dialect name carried by every tree this grammar produces
pub const DIALECT: &str = "MySQL";

/// Parse a full configuration file into a tree
///
/// The whole input must be consumed; trailing garbage after the last section
/// is a syntax error with the exact offending position.
pub fn parse_tree(source: &str) -> Result<ConfigurationTree, SyntaxError> {
    let loc = Arc::new(SourceLocation::new(source));
    configuration_tree(loc.clone())
        .parse(source)
        .map_err(|errors| SyntaxError::from_parse_errors(errors, &loc))
}

/// `[` + run of (alphanumeric | `_`) + `]`
pub(crate) fn section_name(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    optional_whitespace()
        .ignore_then(just('['))
        .ignore_then(positioned_run(loc, is_section_name_char))
        .then_ignore(just(']'))
}

/// A single value: quoted body or bare run
fn value_part(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    // The bare run matches the empty string, so it must come last
    quoted_text(loc.clone(), '\'')
        .or(quoted_text(loc.clone(), '"'))
        .or(bare_value(loc))
}

/// `key = v` and `key = v1,v2,...` in one rule
///
/// Comma-delimited parts are re-joined into a single comma-separated value;
/// the list structure is intentionally discarded. The joined value keeps the
/// first part's position and the sum of the part lengths.
fn valued_key(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, KeyValueNode, Error = ParserError> + Clone {
    positioned_run(loc.clone(), is_key_name_char)
        .then_ignore(just('=').padded())
        .then(value_part(loc).separated_by(just(',')).at_least(1))
        .map(|(key, parts)| KeyValueNode::new(key, join_values(parts)))
}

fn join_values(parts: Vec<PositionedText>) -> PositionedText {
    let position = parts
        .first()
        .map(|p| p.position)
        .unwrap_or(Position::new(1, 1));
    let length = parts.iter().map(|p| p.length).sum();
    let value = parts
        .iter()
        .map(|p| p.value.as_str())
        .collect::<Vec<_>>()
        .join(",");
    PositionedText::with_length(value, position, length)
}

/// A bare key with no `=`: synthesizes the value `"true"` with zero length
fn boolean_key(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, KeyValueNode, Error = ParserError> + Clone {
    positioned_run(loc, is_key_name_char).map(|key| {
        let value = PositionedText::with_length("true", key.position, 0);
        KeyValueNode::new(key, value)
    })
}

/// A quoted or bare include path
fn include_path(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    quoted_text(loc.clone(), '\'')
        .or(quoted_text(loc.clone(), '"'))
        .or(bare_path(loc))
}

/// `!include <path>` or `!includedir <path>`
///
/// Both forms become key/value nodes keyed by the directive literal. The
/// directory keyword is tried first: once a keyword alternative matches the
/// choice is committed, so the longer literal must win on shared prefixes.
fn include_directive(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, KeyValueNode, Error = ParserError> + Clone {
    let keyword = |word: &'static str, loc: Arc<SourceLocation>| {
        just(word).map_with_span(move |_, span: Range<usize>| {
            PositionedText::new(word, loc.byte_to_position(span.start))
        })
    };

    keyword("!includedir", loc.clone())
        .or(keyword("!include", loc.clone()))
        .then_ignore(required_inline_whitespace())
        .then(include_path(loc))
        .map(|(key, path)| KeyValueNode::new(key, path))
}

/// Any key form, in precedence order
pub(crate) fn key(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, ConfigNode, Error = ParserError> + Clone {
    optional_whitespace()
        .ignore_then(choice((
            valued_key(loc.clone()),
            boolean_key(loc.clone()),
            include_directive(loc),
        )))
        .map(ConfigNode::KeyValue)
}

/// `;` or `#` up to end of line; the text may be empty
pub(crate) fn comment(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, ConfigNode, Error = ParserError> + Clone {
    optional_whitespace()
        .ignore_then(one_of(";#"))
        .ignore_then(inline_whitespace())
        .ignore_then(
            filter(|c: &char| *c != '\n' && *c != '\r')
                .repeated()
                .collect::<String>()
                .map_with_span(move |text, span: Range<usize>| {
                    let line = loc.byte_to_position(span.start).line;
                    ConfigNode::Comment(CommentNode::new(line, text))
                }),
        )
}

/// A section name followed by its keys and comments, up to the next section
/// or end of input
pub(crate) fn section(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, SectionNode, Error = ParserError> + Clone {
    section_name(loc.clone())
        .then(key(loc.clone()).or(comment(loc)).repeated())
        .map(|(name, children)| SectionNode::new(name, children))
}

/// Leading keys/comments, then sections, then end of input
pub(crate) fn configuration_tree(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, ConfigurationTree, Error = ParserError> + Clone {
    key(loc.clone())
        .or(comment(loc.clone()))
        .repeated()
        .then(section(loc).map(ConfigNode::Section).repeated())
        .then_ignore(optional_whitespace())
        .then_ignore(end())
        .map(|(mut nodes, sections)| {
            nodes.extend(sections);
            ConfigurationTree::new(DIALECT, nodes)
        })
}
