//! Blank-line limiter: stage 6. Caps runs of consecutive blank lines.

use crate::classify::is_blank;
use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind};

pub struct BlankLineLimiter;

impl Stage for BlankLineLimiter {
    fn kind(&self) -> StageKind {
        StageKind::BlankLines
    }

    fn apply(&self, lines: Vec<String>, ctx: &StyleContext) -> Vec<String> {
        limit_blank_lines(lines, ctx.max_consecutive_blank_lines)
    }
}

/// Keep at most `max_consecutive` blank lines in any run; drop the rest.
pub fn limit_blank_lines(lines: Vec<String>, max_consecutive: usize) -> Vec<String> {
    let mut consecutive_blanks: usize = 0;

    lines
        .into_iter()
        .filter(|line| {
            if is_blank(line) {
                consecutive_blanks += 1;
                consecutive_blanks <= max_consecutive
            } else {
                consecutive_blanks = 0;
                true
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn caps_at_one() {
        let input = lines(&["A", "", "", "", "B"]);
        assert_eq!(limit_blank_lines(input, 1), vec!["A", "", "B"]);
    }

    #[test]
    fn caps_each_run_independently() {
        let input = lines(&["", "", "A", "", "", "", "B", "", ""]);
        assert_eq!(
            limit_blank_lines(input, 2),
            vec!["", "", "A", "", "", "B", "", ""]
        );
    }

    #[test]
    fn zero_removes_all_blank_lines() {
        let input = lines(&["A", "", "  ", "B"]);
        assert_eq!(limit_blank_lines(input, 0), vec!["A", "B"]);
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        let input = lines(&["A", "  ", "\t", "B"]);
        assert_eq!(limit_blank_lines(input, 1), vec!["A", "  ", "B"]);
    }
}
