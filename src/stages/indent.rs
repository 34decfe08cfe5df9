//! Indentation: stage 5.
//!
//! The only stage with state carried across lines: a nesting depth that
//! starts at zero and runs over the whole script. For each line, after
//! stripping its leading whitespace:
//!
//! 1. a line opening with a closer (`END`, `ENDIF`, `ELSE`) decrements the
//!    depth before it is emitted;
//! 2. the line is emitted with the indent unit repeated `depth` times;
//! 3. a line opening with an opener (`WHILE`, `IF`, `ELSEIF`, `ELSE`)
//!    increments the depth after it is emitted.
//!
//! `ELSE` is both, so it lines up with its `IF`. Prefix tests are
//! case-sensitive and run after keyword capitalization. Unbalanced input may
//! drive the depth negative; a negative depth emits no indentation and is
//! otherwise carried through unchanged.

use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind};

/// Prefixes that close a block before the line is emitted.
const CLOSERS: &[&str] = &["END", "ENDIF", "ELSE"];

/// Prefixes that open a block after the line is emitted.
const OPENERS: &[&str] = &["WHILE", "IF", "ELSEIF", "ELSE"];

pub struct Indenter;

impl Stage for Indenter {
    fn kind(&self) -> StageKind {
        StageKind::Indent
    }

    fn apply(&self, lines: Vec<String>, ctx: &StyleContext) -> Vec<String> {
        indent(lines, &ctx.indent_unit)
    }
}

/// Re-indent the script by control-flow nesting depth.
pub fn indent(lines: Vec<String>, unit: &str) -> Vec<String> {
    let mut depth: i64 = 0;
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        let content = line.trim_start();

        if starts_with_any(content, CLOSERS) {
            depth -= 1;
        }

        let repeat = usize::try_from(depth).unwrap_or(0);
        out.push(format!("{}{}", unit.repeat(repeat), content));

        if starts_with_any(content, OPENERS) {
            depth += 1;
        }
    }

    out
}

fn starts_with_any(content: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| content.starts_with(p))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
