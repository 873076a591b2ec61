//! Path queries over the attributed document
//!
//! An XPath-compatible subset evaluated against the merged document. Each
//! expression of a batch gets its own outcome: a match flag, the ordered
//! string results, and an error message when the expression itself was
//! rejected. Positional predicates index the candidate list of their step
//! (for the descendant axis that is the full match list).

mod eval;
mod parser;


pub use eval::{evaluate, evaluate_one, QueryOutcome};
pub use parser::QueryParseError;
