//! Operator spacing: stage 4.
//!
//! Pads exactly one operator per line with single spaces. The operator is
//! chosen by length, not by position: among the configured operators that
//! occur anywhere on the line, the longest wins, and among equally long ones
//! the first in the table wins. This keeps `<>` from turning into `< >` and
//! `@=` from turning into `@ =`.
//!
//! Only the winner's first occurrence is padded. At the start or end of a
//! line there is no neighbour to inspect, so no space is added on that side.

use crate::classify::is_comment;
use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind};

pub struct OperatorSpacer;

impl Stage for OperatorSpacer {
    fn kind(&self) -> StageKind {
        StageKind::Operators
    }

    fn apply(&self, lines: Vec<String>, ctx: &StyleContext) -> Vec<String> {
        space_operators(lines, &ctx.operators)
    }
}

/// Apply operator spacing to every non-comment line.
pub fn space_operators(lines: Vec<String>, operators: &[String]) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if is_comment(&line) {
                line
            } else {
                space_line(line, operators)
            }
        })
        .collect()
}

/// Pick the longest operator present on the line, first in table order on ties.
fn select_operator<'a>(line: &str, operators: &'a [String]) -> Option<&'a str> {
    let mut best: Option<&'a str> = None;
    for operator in operators {
        if operator.is_empty() || !line.contains(operator.as_str()) {
            continue;
        }
        if best.is_none_or(|b| operator.chars().count() > b.chars().count()) {
            best = Some(operator);
        }
    }
    best
}

fn space_line(mut line: String, operators: &[String]) -> String {
    let Some(operator) = select_operator(&line, operators) else {
        return line;
    };
    let Some(idx) = line.find(operator) else {
        return line;
    };
    let end = idx + operator.len();

    if line[end..].chars().next().is_some_and(|c| c != ' ') {
        line.insert(end, ' ');
    }
    if line[..idx].chars().next_back().is_some_and(|c| c != ' ') {
        line.insert(idx, ' ');
    }
    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
