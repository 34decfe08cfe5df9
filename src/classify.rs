//! Line classification: pure predicates shared by every pipeline stage.
//!
//! A TI script line is one of: a comment (first non-blank character is `#`),
//! a blank line, or code. Decorative separators made only of `#` characters
//! are a special kind of comment that the hash-line stage removes.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a line made only of `#` and whitespace, with at least one `#`.
static HASH_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#\s]*#[#\s]*$").expect("hash-line regex must compile"));

/// True if the first non-whitespace character of the line is `#`.
///
/// A blank line is never a comment.
pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with('#')
}

/// True if the line is empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True if the line is a decorative hash rule such as `#########`.
///
/// The line must contain at least one `#` and nothing but `#` and whitespace.
pub fn is_hash(line: &str) -> bool {
    HASH_LINE_RE.is_match(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
