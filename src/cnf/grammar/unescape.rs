//! Backslash normalization for raw configuration values
//!
//! Reproduces the dialect's historical behavior exactly: a doubled backslash
//! collapses to the empty string (not to a single backslash), and any other
//! backslash-prefixed character is copied through verbatim. No other escape
//! sequences (tab, newline, carriage return) are interpreted. Kept for
//! compatibility with existing consumers of these values.

/// Normalize backslash sequences in a raw value
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // `\\` collapses to nothing
            Some('\\') => {}
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            // Lone trailing backslash is kept as-is
            None => out.push('\\'),
        }
    }

    out
}
