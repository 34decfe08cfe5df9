//! Hash-line remover: stage 7. Drops decorative `#####` separator lines.

use crate::classify::is_hash;
use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind};

pub struct HashLineRemover;

impl Stage for HashLineRemover {
    fn kind(&self) -> StageKind {
        StageKind::HashLines
    }

    fn apply(&self, lines: Vec<String>, _ctx: &StyleContext) -> Vec<String> {
        remove_hash_lines(lines)
    }
}

pub fn remove_hash_lines(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().filter(|line| !is_hash(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_only_pure_hash_lines() {
        let input: Vec<String> = ["####", "#ok", "text", "  ## ##  ", "# note"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(remove_hash_lines(input), vec!["#ok", "text", "# note"]);
    }
}
