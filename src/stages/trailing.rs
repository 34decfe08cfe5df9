//! Trailing whitespace: stage 3. Applies to every line, comments included.

use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind};

pub struct TrailingWhitespaceTrimmer;

impl Stage for TrailingWhitespaceTrimmer {
    fn kind(&self) -> StageKind {
        StageKind::Trailing
    }

    fn apply(&self, lines: Vec<String>, _ctx: &StyleContext) -> Vec<String> {
        trim_trailing(lines)
    }
}

pub fn trim_trailing(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            let trimmed = line.trim_end();
            if trimmed.len() == line.len() {
                line
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}
