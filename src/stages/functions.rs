//! Function-name capitalization: stage 2.
//!
//! Rewrites reserved TI function names (`CellGetN`, `ASCIIOutput`, `DIMNM`,
//! ...) to their canonical case. For each name, only its first
//! case-insensitive occurrence on the line is considered, and two rules are
//! checked against that occurrence:
//!
//! - **Bare word**: the occurrence is preceded by a single space.
//! - **Lead call**: the occurrence starts at character offset exactly 1 and
//!   a `(` follows within three characters. The one-character prefix is
//!   discarded. This rule is positional on purpose: a two-space indent does
//!   not qualify.
//!
//! Both rules may fire for the same name. Names later in the table see the
//! line as rewritten by earlier ones.

use crate::classify::is_comment;
use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind, find_ignore_ascii_case, splice};

/// How far past the name a `(` may appear for the lead-call rule.
const CALL_PAREN_WINDOW: usize = 3;

pub struct FunctionCapitalizer;

impl Stage for FunctionCapitalizer {
    fn kind(&self) -> StageKind {
        StageKind::Functions
    }

    fn apply(&self, lines: Vec<String>, ctx: &StyleContext) -> Vec<String> {
        capitalize_functions(lines, &ctx.function_names)
    }
}

/// Apply function-name capitalization to every non-comment line.
pub fn capitalize_functions(lines: Vec<String>, names: &[String]) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if is_comment(&line) {
                line
            } else {
                capitalize_line(line, names)
            }
        })
        .collect()
}

fn capitalize_line(mut line: String, names: &[String]) -> String {
    for name in names {
        let Some(idx) = find_ignore_ascii_case(&line, name) else {
            continue;
        };
        let end = idx + name.len();

        // A match at offset 0 has no preceding character.
        if line[..idx].ends_with(' ') {
            line = splice(&line, idx, end, name);
        }

        let lead_call = line[..idx].chars().count() == 1
            && line[end..].chars().take(CALL_PAREN_WINDOW).any(|c| c == '(');
        if lead_call {
            line = splice(&line, 0, end, name);
        }
    }
    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
