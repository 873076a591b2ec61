//! Lexical primitives shared by the configuration grammar
//!
//! Character-class matchers, whitespace skipping and position-tagged text
//! capture. Byte spans reported by the combinators are converted to
//! line/column positions through a shared [`SourceLocation`] index.

use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

use crate::cnf::ast::{PositionedText, SourceLocation};

/// Type alias for parser error
pub(crate) type ParserError = Simple<char>;

pub(crate) fn is_section_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub(crate) fn is_key_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Consume any run of spaces, tabs and newlines
pub(crate) fn optional_whitespace() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace()).repeated().ignored()
}

/// Consume spaces and tabs on the current line only
pub(crate) fn inline_whitespace() -> impl Parser<char, (), Error = ParserError> + Clone {
    one_of(" \t").repeated().ignored()
}

/// At least one space or tab
pub(crate) fn required_inline_whitespace() -> impl Parser<char, (), Error = ParserError> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// A non-empty run of characters matching `pred`, tagged with the position of
/// its first character
pub(crate) fn positioned_run(
    loc: Arc<SourceLocation>,
    pred: fn(char) -> bool,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    filter(move |c: &char| pred(*c))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map_with_span(move |s, span: Range<usize>| {
            PositionedText::new(s, loc.byte_to_position(span.start))
        })
}

/// A quoted string body; the quotes are stripped and the position refers to
/// the first character inside them
///
/// The body excludes the matching quote character and line terminators. No
/// escape sequences are interpreted here.
pub(crate) fn quoted_text(
    loc: Arc<SourceLocation>,
    quote: char,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    just(quote)
        .ignore_then(
            filter(move |c: &char| *c != quote && *c != '\n' && *c != '\r')
                .repeated()
                .collect::<String>()
                .map_with_span(move |s, span: Range<usize>| {
                    PositionedText::new(s, loc.byte_to_position(span.start))
                }),
        )
        .then_ignore(just(quote))
}

/// A bare (possibly empty) value run: anything except quotes, commas and
/// line terminators
pub(crate) fn bare_value(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    filter(|c: &char| !matches!(*c, '\'' | '"' | ',' | '\n' | '\r'))
        .repeated()
        .collect::<String>()
        .map_with_span(move |s, span: Range<usize>| {
            PositionedText::new(s, loc.byte_to_position(span.start))
        })
}

/// A bare include path: a non-empty run without whitespace or quotes
pub(crate) fn bare_path(
    loc: Arc<SourceLocation>,
) -> impl Parser<char, PositionedText, Error = ParserError> + Clone {
    filter(|c: &char| !c.is_whitespace() && *c != '\'' && *c != '"')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map_with_span(move |s, span: Range<usize>| {
            PositionedText::new(s, loc.byte_to_position(span.start))
        })
}
