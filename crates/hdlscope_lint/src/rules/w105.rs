//! W105: Empty sensitivity list.

use std::sync::LazyLock;

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;
use regex::Regex;

use crate::helpers::finding;
use crate::LintRule;

static EMPTY_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\s*\(\s*\)").expect("empty event pattern is valid"));

/// Detects `always @()` blocks, which never trigger.
pub struct EmptySensitivity;

impl LintRule for EmptySensitivity {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Warning, 105)
    }

    fn name(&self) -> &str {
        "empty_sensitivity"
    }

    fn description(&self) -> &str {
        "always block has an empty sensitivity list"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        for block in model.modules.iter().flat_map(|m| m.blocks.iter()) {
            if block.keyword != "always" || !block.sensitivity.trim().is_empty() {
                continue;
            }
            if EMPTY_EVENT.is_match(source.masked_line(block.line)) {
                sink.emit(
                    finding(self, block.line, "always block has an empty sensitivity list")
                        .with_fix("use '@(*)' for combinational logic or list the clock edge"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::test_support::run_rule;

    #[test]
    fn empty_parens() {
        let text = "module m(input a, output reg y);\n  always @() y = a;\n  always @( ) y = a;\nendmodule\n";
        let findings = run_rule(&EmptySensitivity, text);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn delay_loops_are_not_empty_lists() {
        let text = "module tb;\n  reg clk;\n  always #5 clk = ~clk;\nendmodule\n";
        assert!(run_rule(&EmptySensitivity, text).is_empty());
    }

    #[test]
    fn always_comb_has_no_list() {
        let text = "module m(input a, output logic y);\n  always_comb y = a;\nendmodule\n";
        assert!(run_rule(&EmptySensitivity, text).is_empty());
    }
}
