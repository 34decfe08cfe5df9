//! Pipeline stages.
//!
//! Each stage is a pure `Vec<String> -> Vec<String>` transformation over the
//! whole script. Stages never split or merge lines and never reorder them;
//! only the blank-line limiter and the hash-line remover drop lines.
//!
//! # Stage order
//!
//! 1. **Keywords**: canonical case for a leading control keyword.
//! 2. **Functions**: canonical case for reserved TI function names.
//! 3. **Trailing**: strip trailing whitespace.
//! 4. **Operators**: pad the longest operator on a line with single spaces.
//! 5. **Indent**: re-indent by control-flow nesting depth.
//! 6. **Blank lines**: cap runs of consecutive blank lines.
//! 7. **Hash lines**: drop decorative `#####` separators.

pub mod blank_lines;
pub mod functions;
pub mod hash_lines;
pub mod indent;
pub mod keywords;
pub mod operators;
pub mod trailing;

use serde::{Deserialize, Serialize};

use crate::pipeline::StyleContext;

pub use blank_lines::BlankLineLimiter;
pub use functions::FunctionCapitalizer;
pub use hash_lines::HashLineRemover;
pub use indent::Indenter;
pub use keywords::KeywordCapitalizer;
pub use operators::OperatorSpacer;
pub use trailing::TrailingWhitespaceTrimmer;

/// Trait for a single whole-script transformation.
///
/// Stages read their tables from the injected [`StyleContext`] and hold no
/// state between runs. Any running state (nesting depth, blank-run length)
/// lives on the stack of [`apply`](Stage::apply).
pub trait Stage {
    fn kind(&self) -> StageKind;
    fn apply(&self, lines: Vec<String>, ctx: &StyleContext) -> Vec<String>;

    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Identifies a stage, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Keywords,
    Functions,
    Trailing,
    Operators,
    Indent,
    BlankLines,
    HashLines,
}

impl StageKind {
    /// Every stage in the fixed order the pipeline applies them.
    pub const ALL: [StageKind; 7] = [
        Self::Keywords,
        Self::Functions,
        Self::Trailing,
        Self::Operators,
        Self::Indent,
        Self::BlankLines,
        Self::HashLines,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::Functions => "functions",
            Self::Trailing => "trailing",
            Self::Operators => "operators",
            Self::Indent => "indent",
            Self::BlankLines => "blank_lines",
            Self::HashLines => "hash_lines",
        }
    }

    /// Build the stage implementation for this kind.
    pub fn build(self) -> Box<dyn Stage> {
        match self {
            Self::Keywords => Box::new(KeywordCapitalizer),
            Self::Functions => Box::new(FunctionCapitalizer),
            Self::Trailing => Box::new(TrailingWhitespaceTrimmer),
            Self::Operators => Box::new(OperatorSpacer),
            Self::Indent => Box::new(Indenter),
            Self::BlankLines => Box::new(BlankLineLimiter),
            Self::HashLines => Box::new(HashLineRemover),
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
///
/// ASCII folding keeps byte offsets identical between the folded copy and the
/// original line, so the returned index can slice `haystack` directly.
pub(crate) fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .to_ascii_uppercase()
        .find(&needle.to_ascii_uppercase())
}

/// Replace `line[start..end]` with `replacement`.
pub(crate) fn splice(line: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(line.len() - (end - start) + replacement.len());
    out.push_str(&line[..start]);
    out.push_str(replacement);
    out.push_str(&line[end..]);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
