//! Tidy pipeline for TI scripts.
//!
//! Applies the [stages](crate::stages) in their fixed order over the script
//! as a sequence of lines. Every stage reads the complete output of the
//! previous one. Capitalization runs first because the indentation stage
//! matches on canonical-case keywords. Indentation runs before the blank-line
//! cap because the cap measures the already-indented lines.
//!
//! The pipeline is infallible and deterministic. It is not a parser:
//! unbalanced `IF`/`END` pairs produce wrong indentation, not errors.

use crate::config::defaults;
use crate::stages::{Stage, StageKind};

// ---------------------------------------------------------------------------
// Transformation context
// ---------------------------------------------------------------------------

/// Style tables and limits for one run. Immutable once the pipeline is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleContext {
    /// Control keywords in canonical case, in the order they are tried.
    pub keywords: Vec<String>,
    /// Reserved function names in canonical case, in the order they are tried.
    pub function_names: Vec<String>,
    /// Operators to pad. Order only matters for equal-length ties.
    pub operators: Vec<String>,
    /// Repeated once per nesting level.
    pub indent_unit: String,
    pub max_consecutive_blank_lines: usize,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            keywords: defaults::keywords(),
            function_names: defaults::function_names(),
            operators: defaults::operators(),
            indent_unit: defaults::INDENT.to_string(),
            max_consecutive_blank_lines: defaults::MAX_CONSECUTIVE_BLANK_LINES,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline output
// ---------------------------------------------------------------------------

/// Result of running the pipeline over one script.
#[derive(Debug, Clone)]
pub struct TidyOutput {
    /// The tidied script.
    pub lines: Vec<String>,
    pub lines_in: usize,
    pub lines_out: usize,
    /// Positions (over the shorter of input and output) whose text differs.
    pub lines_changed: usize,
    /// Names of the stages that ran, in order.
    pub stages: Vec<&'static str>,
}

impl TidyOutput {
    /// True if the output differs from the input in any way.
    pub fn is_changed(&self) -> bool {
        self.lines_changed > 0 || self.lines_in != self.lines_out
    }
}

// ---------------------------------------------------------------------------
// Pipeline orchestrator
// ---------------------------------------------------------------------------

pub struct Pipeline {
    ctx: StyleContext,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Build a pipeline running every stage.
    pub fn new(ctx: StyleContext) -> Self {
        Self::with_stages(ctx, &StageKind::ALL)
    }

    /// Build a pipeline running only the given stages.
    ///
    /// The stages still run in the fixed pipeline order regardless of the
    /// order of `enabled`.
    pub fn with_stages(ctx: StyleContext, enabled: &[StageKind]) -> Self {
        let stages = StageKind::ALL
            .into_iter()
            .filter(|kind| enabled.contains(kind))
            .map(StageKind::build)
            .collect();
        Self { ctx, stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over the script.
    pub fn run(&self, lines: Vec<String>) -> TidyOutput {
        let original = lines.clone();
        let lines_in = lines.len();

        let lines = self
            .stages
            .iter()
            .fold(lines, |lines, stage| stage.apply(lines, &self.ctx));

        let lines_changed = original
            .iter()
            .zip(&lines)
            .filter(|(before, after)| before != after)
            .count();

        TidyOutput {
            lines_in,
            lines_out: lines.len(),
            lines_changed,
            stages: self.stage_names(),
            lines,
        }
    }
}

/// Run the full pipeline with the given context and return the tidied lines.
pub fn tidy(lines: Vec<String>, ctx: &StyleContext) -> Vec<String> {
    Pipeline::new(ctx.clone()).run(lines).lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn ctx() -> StyleContext {
        StyleContext {
            indent_unit: "  ".to_string(),
            ..StyleContext::default()
        }
    }

    #[test]
    fn empty_input_returns_empty() {
        let result = Pipeline::new(ctx()).run(Vec::new());
        assert!(result.lines.is_empty());
        assert_eq!(result.lines_in, 0);
        assert!(!result.is_changed());
    }

    #[test]
    fn full_pipeline_tidies_script() {
        let input = lines(&[
            "#####################",
            "if(x=1);   ",
            "   nVal = cellgetn('Sales', 'a');",
            "",
            "",
            "",
            "else;",
            "  asciioutput(sFile, 'none');",
            "endif;",
        ]);
        let result = Pipeline::new(ctx()).run(input);
        assert_eq!(
            result.lines,
            vec![
                "IF(x = 1);",
                "  nVal = CellGetN('Sales', 'a');",
                "  ",
                "ELSE;",
                "  ASCIIOutput(sFile, 'none');",
                "ENDIF;",
            ]
        );
        assert_eq!(result.lines_in, 9);
        assert_eq!(result.lines_out, 6);
        assert!(result.is_changed());
    }

    #[test]
    fn disabled_stages_are_skipped_but_order_holds() {
        let pipeline =
            Pipeline::with_stages(ctx(), &[StageKind::Indent, StageKind::Keywords]);
        assert_eq!(pipeline.stage_names(), vec!["keywords", "indent"]);

        let result = pipeline.run(lines(&["if(a);", "b=1;", "endif;"]));
        assert_eq!(result.lines, vec!["IF(a);", "  b=1;", "ENDIF;"]);
    }

    #[test]
    fn tidy_is_idempotent_on_canonical_input() {
        let canonical = lines(&["IF(x = 1);", "  y = 2;", "ENDIF;", "", "z = 3;"]);
        let once = tidy(canonical.clone(), &ctx());
        assert_eq!(once, canonical);
        assert_eq!(tidy(once.clone(), &ctx()), once);
    }
}
