use titidy::config::defaults;
use titidy::pipeline::{Pipeline, StyleContext, tidy};
use titidy::config::schema::LineEnding;
use titidy::script::{join_lines, split_lines};
use titidy::stages::StageKind;

fn lines(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn two_space() -> StyleContext {
    StyleContext {
        indent_unit: "  ".to_string(),
        ..StyleContext::default()
    }
}

const MESSY_PROLOG: &str = "\
##############################
# Load parameters
##############################
sCube='Sales';
nMax = dimsiz('Region');
i=1;
while(i<=nMax);
sEl = dimnm('Region', i);
if(cellisupdateable(sCube, sEl, 'Amount')=1);
cellputn(0, sCube, sEl, 'Amount');
elseif(sEl@='Total');
 itemskip;
else;
asciioutput('err.txt', sEl);
endif;



i = i + 1;
end;
";

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn tidies_realistic_prolog() {
    // A name glued to `(` is left alone; blank lines inside a block carry the indent.
    let result = Pipeline::new(two_space()).run(split_lines(MESSY_PROLOG));

    assert_eq!(
        result.lines,
        lines(&[
            "# Load parameters",
            "sCube = 'Sales';",
            "nMax = DIMSIZ('Region');",
            "i = 1;",
            "WHILE(i <= nMax);",
            "  sEl = DIMNM('Region', i);",
            "  IF(cellisupdateable(sCube, sEl, 'Amount') = 1);",
            "    cellputn(0, sCube, sEl, 'Amount');",
            "  ELSEIF(sEl @= 'Total');",
            "    ItemSkip;",
            "  ELSE;",
            "    asciioutput('err.txt', sEl);",
            "  ENDIF;",
            "  ",
            "  i = i + 1;",
            "END;",
        ])
    );
}

#[test]
fn if_else_block_indentation() {
    let input = lines(&["IF X;", "foo();", "ELSE;", "bar();", "ENDIF;"]);
    let result = Pipeline::with_stages(two_space(), &[StageKind::Indent]).run(input);
    assert_eq!(
        result.lines,
        lines(&["IF X;", "  foo();", "ELSE;", "  bar();", "ENDIF;"])
    );
}

#[test]
fn text_roundtrip_through_pipeline() {
    let text = "if(a=1);\r\nb=2;\r\nendif;\r\n";
    let tidied = tidy(split_lines(text), &two_space());
    assert_eq!(
        join_lines(&tidied, LineEnding::Lf),
        "IF(a = 1);\n  b = 2;\nENDIF;\n"
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn only_removal_stages_shrink_the_script() {
    let input = split_lines(MESSY_PROLOG);
    let ctx = two_space();

    for kind in StageKind::ALL {
        let out = Pipeline::with_stages(ctx.clone(), &[kind]).run(input.clone());
        match kind {
            StageKind::BlankLines | StageKind::HashLines => {
                assert!(out.lines_out < out.lines_in, "{kind} should drop lines");
            }
            _ => assert_eq!(out.lines_out, out.lines_in, "{kind} changed line count"),
        }
    }
}

#[test]
fn no_stage_reorders_lines() {
    // Distinct markers survive every stage in their original relative order.
    let input = lines(&["a1 = 1;", "", "", "IF(b);", "####", "c3 = 3;", "ENDIF;"]);
    let out = tidy(input, &two_space());
    let positions: Vec<usize> = ["a1", "IF(b)", "c3", "ENDIF"]
        .iter()
        .map(|m| out.iter().position(|l| l.contains(m)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn tidy_converges_once_indentation_is_canonical() {
    // The first pass indents bare calls, which the second pass then capitalizes.
    let ctx = two_space();
    let once = tidy(split_lines(MESSY_PROLOG), &ctx);
    let twice = tidy(once.clone(), &ctx);
    assert!(twice.contains(&"    CellPutN(0, sCube, sEl, 'Amount');".to_string()));
    assert_eq!(tidy(twice.clone(), &ctx), twice);
}

#[test]
fn canonical_script_is_unchanged() {
    let canonical = lines(&[
        "# header",
        "nTotal = 0;",
        "",
        "WHILE(nTotal < 10);",
        "  nTotal = nTotal + 1;",
        "END;",
    ]);
    let result = Pipeline::new(two_space()).run(canonical.clone());
    assert_eq!(result.lines, canonical);
    assert!(!result.is_changed());
}

#[test]
fn unbalanced_nesting_is_absorbed() {
    let input = lines(&["ENDIF;", "ENDIF;", "x = 1;", "IF(a);", "y = 2;"]);
    let out = tidy(input, &two_space());
    assert_eq!(out, lines(&["ENDIF;", "ENDIF;", "x = 1;", "IF(a);", "y = 2;"]));
}

// ---------------------------------------------------------------------------
// Injected configuration
// ---------------------------------------------------------------------------

#[test]
fn custom_tables_replace_defaults() {
    let ctx = StyleContext {
        keywords: lines(&["IF", "ENDIF"]),
        function_names: lines(&["MyLoad"]),
        operators: lines(&["|"]),
        indent_unit: "\t".to_string(),
        max_consecutive_blank_lines: 0,
    };
    let input = lines(&["if(x);", "s = a|b;", "", "t = myload(s);", "endif;"]);
    let out = tidy(input, &ctx);
    assert_eq!(
        out,
        lines(&["IF(x);", "\ts = a | b;", "\tt = MyLoad(s);", "ENDIF;"])
    );
}

#[test]
fn default_context_uses_default_tables() {
    let ctx = StyleContext::default();
    assert_eq!(ctx.indent_unit, defaults::INDENT);
    assert_eq!(ctx.keywords, defaults::keywords());
    assert_eq!(ctx.operators, defaults::operators());
}
