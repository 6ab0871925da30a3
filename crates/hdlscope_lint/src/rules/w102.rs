//! W102: Combinational loop through a continuous assignment.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;

use crate::helpers::{count_word, finding};
use crate::LintRule;

/// Detects `assign` statements whose source line mentions the driven
/// identifier more than once, i.e. the target feeds its own expression.
pub struct CombinationalLoop;

impl LintRule for CombinationalLoop {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Warning, 102)
    }

    fn name(&self) -> &str {
        "combinational_loop"
    }

    fn description(&self) -> &str {
        "continuous assignment reads its own target"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        for assign in model.modules.iter().flat_map(|m| m.assignments.iter()) {
            let Some(target) = assign.target() else {
                continue;
            };
            if count_word(source.masked_line(assign.line), target) > 1 {
                sink.emit(
                    finding(
                        self,
                        assign.line,
                        format!("'{target}' is assigned from an expression that reads '{target}'"),
                    )
                    .with_fix("break the loop with a register or a separate signal")
                    .with_note("detected from repeated identifiers on the assignment line"),
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
    fn self_reference() {
        let text = "module m(input a, output y);\n  assign y = a & y;\nendmodule\n";
        let findings = run_rule(&CombinationalLoop, text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn prefix_names_are_distinct() {
        let text = "module m(input y_n, output y);\n  assign y = ~y_n;\nendmodule\n";
        assert!(run_rule(&CombinationalLoop, text).is_empty());
    }

    #[test]
    fn indexed_target() {
        let text = "module m(output [1:0] v);\n  assign v[1] = v[0];\nendmodule\n";
        assert_eq!(run_rule(&CombinationalLoop, text).len(), 1);
    }
}
