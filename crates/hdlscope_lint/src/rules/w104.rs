//! W104: Non-blocking assignment in a combinational block.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::{BlockKind, DesignModel};
use hdlscope_source::SourceText;

use crate::helpers::finding;
use crate::LintRule;

/// Detects `<=` assignments inside combinational blocks.
pub struct NonblockingInCombinational;

impl LintRule for NonblockingInCombinational {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Warning, 104)
    }

    fn name(&self) -> &str {
        "nonblocking_in_combinational"
    }

    fn description(&self) -> &str {
        "non-blocking assignment used in a combinational block"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, model: &DesignModel, _source: &SourceText, sink: &FindingSink) {
        for block in model.modules.iter().flat_map(|m| m.blocks.iter()) {
            if block.kind != BlockKind::Combinational {
                continue;
            }
            for assign in block.assignments.iter().filter(|a| !a.blocking) {
                sink.emit(
                    finding(
                        self,
                        assign.line,
                        format!(
                            "non-blocking assignment to '{}' in combinational block",
                            assign.lhs
                        ),
                    )
                    .with_fix(format!("use '{} = {}'", assign.lhs, assign.rhs)),
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
    fn nonblocking_in_star_block() {
        let text = "module m(input a, output reg y);\n  always @(*) y <= a;\nendmodule\n";
        let findings = run_rule(&NonblockingInCombinational, text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn comparison_is_not_assignment() {
        let text = "module m(input a, b, output reg y);\n  always @(*) if (a <= b) y = 1; else y = 0;\nendmodule\n";
        assert!(run_rule(&NonblockingInCombinational, text).is_empty());
    }
}
