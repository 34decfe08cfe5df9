//! Keyword capitalization: stage 1.
//!
//! Rewrites a control keyword (`IF`, `ELSEIF`, `WHILE`, ...) to its canonical
//! case when it is the first token of the line. Keywords later in the table
//! see the line as rewritten by earlier ones, so when several keywords match
//! the same line the last rewrite wins.

use crate::classify::is_comment;
use crate::pipeline::StyleContext;
use crate::stages::{Stage, StageKind, find_ignore_ascii_case, splice};

pub struct KeywordCapitalizer;

impl Stage for KeywordCapitalizer {
    fn kind(&self) -> StageKind {
        StageKind::Keywords
    }

    fn apply(&self, lines: Vec<String>, ctx: &StyleContext) -> Vec<String> {
        capitalize_keywords(lines, &ctx.keywords)
    }
}

/// Apply keyword capitalization to every non-comment line.
pub fn capitalize_keywords(lines: Vec<String>, keywords: &[String]) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if is_comment(&line) {
                line
            } else {
                capitalize_line(line, keywords)
            }
        })
        .collect()
}

fn capitalize_line(mut line: String, keywords: &[String]) -> String {
    for keyword in keywords {
        let Some(idx) = find_ignore_ascii_case(&line, keyword) else {
            continue;
        };
        if find_ignore_ascii_case(line.trim(), keyword) == Some(0) {
            line = splice(&line, idx, idx + keyword.len(), keyword);
        }
    }
    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        ["IF", "ELSEIF", "ELSE", "ENDIF", "WHILE", "END", "BREAK"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    fn run(line: &str) -> String {
        capitalize_keywords(vec![line.to_string()], &keywords()).remove(0)
    }

    #[test]
    fn capitalizes_leading_keyword() {
        assert_eq!(run("if X = 1;"), "IF X = 1;");
        assert_eq!(run("while(i < 10);"), "WHILE(i < 10);");
        assert_eq!(run("endif;"), "ENDIF;");
        assert_eq!(run("end;"), "END;");
    }

    #[test]
    fn keeps_indentation() {
        assert_eq!(run("    elseif(x = 2);"), "    ELSEIF(x = 2);");
    }

    #[test]
    fn ignores_keyword_mid_line() {
        assert_eq!(run("x = if(1)"), "x = if(1)");
        assert_eq!(run("nEnd = 3;"), "nEnd = 3;");
    }

    #[test]
    fn only_the_first_occurrence_is_rewritten() {
        assert_eq!(run("if(x = 'if');"), "IF(x = 'if');");
    }

    #[test]
    fn overlapping_keywords_settle_on_full_token() {
        // ELSE and ELSEIF both match at the start; both rewrite the same span.
        assert_eq!(run("ElseIf(y);"), "ELSEIF(y);");
        assert_eq!(run("Else;"), "ELSE;");
    }

    #[test]
    fn comments_pass_through() {
        assert_eq!(run("# if this is a comment"), "# if this is a comment");
    }

    #[test]
    fn preserves_line_count() {
        let lines = vec!["if x;".to_string(), String::new(), "# c".to_string()];
        assert_eq!(capitalize_keywords(lines, &keywords()).len(), 3);
    }
}
