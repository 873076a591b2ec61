//! Position tracking for parsed configuration text
//!
//! Converts byte offsets produced by the parser into 1-based line/column
//! positions, and pairs parsed strings with the position of their first
//! character.

use serde::Serialize;
use std::fmt;

/// A 1-based line/column position in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A string value annotated with its source position and length
///
/// The position always refers to the first character of the matched text.
/// Immutable once produced by the grammar; `length` counts characters of the
/// underlying matched text, which for synthesized values (boolean keys) or
/// joined values (multi-valued keys) differs from `value.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionedText {
    pub value: String,
    pub position: Position,
    pub length: usize,
}

impl PositionedText {
    /// Positioned text whose length is the character count of `value`
    pub fn new(value: impl Into<String>, position: Position) -> Self {
        let value = value.into();
        let length = value.chars().count();
        Self {
            value,
            position,
            length,
        }
    }

    /// Positioned text with an explicit length
    pub fn with_length(value: impl Into<String>, position: Position, length: usize) -> Self {
        Self {
            value: value.into(),
            position,
            length,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> usize {
        self.position.line
    }
}

impl fmt::Display for PositionedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    /// Create a new SourceLocation from source text
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line + 1, column + 1)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
