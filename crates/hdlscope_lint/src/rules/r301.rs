//! R301: Wide multiplexer from a case statement with many numeric items.

use std::sync::LazyLock;

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;
use regex::Regex;

use crate::helpers::{contains_word, finding};
use crate::LintRule;

static CASE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcase[xz]?\b").expect("case pattern is valid"));

static NUMERIC_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[0-9][0-9_]*|[0-9]*\s*'[sS]?[bBoOdDhH]\s*[0-9a-fA-FxXzZ_?]+)\s*:")
        .expect("case item pattern is valid")
});

/// Lines after a `case` searched for items before giving up.
const WINDOW: u32 = 50;
/// Item counts above this are reported.
const MAX_ITEMS: usize = 8;

/// Detects `case` statements with more than eight numeric items, which
/// synthesize to wide multiplexers.
///
/// Items are lines of the form `<number>:` between the `case` line and
/// `endcase`, looking at most fifty lines ahead.
pub struct WideMux;

impl LintRule for WideMux {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Resource, 301)
    }

    fn name(&self) -> &str {
        "wide_mux"
    }

    fn description(&self) -> &str {
        "case statement with many items infers a wide multiplexer"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, _model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        let last = source.line_count();
        for line in 1..=last {
            if !CASE_START.is_match(source.masked_line(line)) {
                continue;
            }
            let window_end = line.saturating_add(WINDOW).min(last);
            let mut items = 0;
            for n in line + 1..=window_end {
                let text = source.masked_line(n);
                if contains_word(text, "endcase") {
                    break;
                }
                if NUMERIC_ITEM.is_match(text) {
                    items += 1;
                }
            }
            if items > MAX_ITEMS {
                sink.emit(
                    finding(
                        self,
                        line,
                        format!("case statement with {items} items infers a wide multiplexer"),
                    )
                    .with_fix("consider a ROM, a pipelined mux tree or one-hot select")
                    .with_note("items are counted from '<number>:' lines before 'endcase'"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::test_support::run_rule;

    fn case_with(items: usize) -> String {
        let mut text = String::from(
            "module m(input [3:0] s, output reg [7:0] y);\n  always @(*) begin\n    case (s)\n",
        );
        for i in 0..items {
            text.push_str(&format!("      4'd{i}: y = 8'd{i};\n"));
        }
        text.push_str("      default: y = 0;\n    endcase\n  end\nendmodule\n");
        text
    }

    #[test]
    fn patterns_compile() {
        assert!(NUMERIC_ITEM.is_match("  4'd3: y = 1;"));
        assert!(NUMERIC_ITEM.is_match("  12 : y = 1;"));
        assert!(!NUMERIC_ITEM.is_match("  IDLE: y = 1;"));
        assert!(CASE_START.is_match("casez (x)"));
        assert!(!CASE_START.is_match("endcase"));
    }

    #[test]
    fn nine_items_reported() {
        let findings = run_rule(&WideMux, &case_with(9));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(3));
        assert!(findings[0].message.contains("9 items"));
    }

    #[test]
    fn eight_items_fine() {
        assert!(run_rule(&WideMux, &case_with(8)).is_empty());
    }
}
