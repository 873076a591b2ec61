//! Parses path-query expressions into location steps
//!
//! The accepted syntax is an XPath-compatible subset: absolute and relative
//! location paths, `/` child and `//` descendant axes, name tests and the
//! `*` wildcard, terminal `@attribute` and `text()` selections, and
//! predicates of the form `[@attr='value']` or `[n]` (1-based).

use chumsky::prelude::*;
use thiserror::Error;

/// Type alias for parser error
type ParserError = Simple<char>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeTest {
    Name(String),
    Wildcard,
    Attribute(String),
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Predicate {
    AttributeEquals { name: String, value: String },
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub axis: Axis,
    pub test: NodeTest,
    pub predicates: Vec<Predicate>,
}

/// A parsed expression: steps plus whether the path was anchored with a
/// leading slash
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathQuery {
    pub absolute: bool,
    pub steps: Vec<Step>,
}

/// A rejected expression, reported per-expression by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid path expression at offset {offset}: {message}")]
pub struct QueryParseError {
    pub offset: usize,
    pub message: String,
}

fn name() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '-')
        .repeated()
        .at_least(1)
        .collect::<String>()
}

fn quoted_literal(quote: char) -> impl Parser<char, String, Error = ParserError> + Clone {
    just(quote)
        .ignore_then(
            filter(move |c: &char| *c != quote)
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just(quote))
}

fn node_test() -> impl Parser<char, NodeTest, Error = ParserError> + Clone {
    // `text()` must be tried before the plain name test, which would
    // otherwise commit to the name `text` and strand the parentheses
    choice((
        just('@').ignore_then(name()).map(NodeTest::Attribute),
        just("text()").to(NodeTest::Text),
        just('*').to(NodeTest::Wildcard),
        name().map(NodeTest::Name),
    ))
}

fn predicate() -> impl Parser<char, Predicate, Error = ParserError> + Clone {
    let attribute_equals = just('@')
        .ignore_then(name())
        .then_ignore(just('=').padded())
        .then(quoted_literal('\'').or(quoted_literal('"')))
        .map(|(name, value)| Predicate::AttributeEquals { name, value });

    let position = filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|digits: String, span| {
            digits
                .parse::<usize>()
                .map(Predicate::Position)
                .map_err(|_| Simple::custom(span, "position out of range"))
        });

    attribute_equals
        .or(position)
        .padded()
        .delimited_by(just('['), just(']'))
}

fn query() -> impl Parser<char, PathQuery, Error = ParserError> + Clone {
    let step_body = node_test().then(predicate().repeated());

    let slashed = just("//")
        .to(Axis::Descendant)
        .or(just('/').to(Axis::Child))
        .then(step_body.clone())
        .map(|(axis, (test, predicates))| Step {
            axis,
            test,
            predicates,
        });

    let leading = step_body.map(|(test, predicates)| Step {
        axis: Axis::Child,
        test,
        predicates,
    });

    leading
        .or_not()
        .then(slashed.repeated())
        .then_ignore(end())
        .map(|(first, rest)| {
            let absolute = first.is_none();
            let mut steps: Vec<Step> = first.into_iter().collect();
            steps.extend(rest);
            PathQuery { absolute, steps }
        })
}

pub(crate) fn parse_query(expression: &str) -> Result<PathQuery, QueryParseError> {
    let parsed = query().parse(expression.trim()).map_err(describe)?;

    if parsed.steps.is_empty() {
        return Err(QueryParseError {
            offset: 0,
            message: "empty expression".to_string(),
        });
    }
    for (index, step) in parsed.steps.iter().enumerate() {
        let terminal_only = matches!(step.test, NodeTest::Attribute(_) | NodeTest::Text);
        if terminal_only && index + 1 < parsed.steps.len() {
            return Err(QueryParseError {
                offset: 0,
                message: "attribute and text() steps must come last".to_string(),
            });
        }
    }

    Ok(parsed)
}

fn describe(errors: Vec<ParserError>) -> QueryParseError {
    let error = errors.into_iter().max_by_key(|e| e.span().start);
    match error {
        None => QueryParseError {
            offset: 0,
            message: "unparseable expression".to_string(),
        },
        Some(error) => {
            let found = match error.found() {
                Some(c) => format!("unexpected '{}'", c),
                None => "unexpected end of input".to_string(),
            };
            QueryParseError {
                offset: error.span().start,
                message: found,
            }
        }
    }
}
