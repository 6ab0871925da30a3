//! W103: Blocking assignment in a sequential block.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::{BlockKind, DesignModel};
use hdlscope_source::SourceText;

use crate::helpers::finding;
use crate::LintRule;

/// Detects `=` assignments inside edge-triggered blocks; one finding per
/// assignment.
pub struct BlockingInSequential;

impl LintRule for BlockingInSequential {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Warning, 103)
    }

    fn name(&self) -> &str {
        "blocking_in_sequential"
    }

    fn description(&self) -> &str {
        "blocking assignment used in a sequential block"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, model: &DesignModel, _source: &SourceText, sink: &FindingSink) {
        for block in model.modules.iter().flat_map(|m| m.blocks.iter()) {
            if block.kind != BlockKind::Sequential {
                continue;
            }
            for assign in block.assignments.iter().filter(|a| a.blocking) {
                sink.emit(
                    finding(
                        self,
                        assign.line,
                        format!("blocking assignment to '{}' in sequential block", assign.lhs),
                    )
                    .with_fix(format!("use '{} <= {}'", assign.lhs, assign.rhs)),
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
    fn assign_keyword_in_posedge_block() {
        let text = "\
module add(input clk, input a, b, cin, output reg sum);
  always @(posedge clk) begin
    assign sum = a + b + cin;
  end
endmodule
";
        let findings = run_rule(&BlockingInSequential, text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(3));
        assert_eq!(findings[0].fix.as_deref(), Some("use 'sum <= a + b + cin'"));
    }

    #[test]
    fn nonblocking_is_fine() {
        let text = "module m(input clk, d, output reg q);\n  always @(posedge clk) q <= d;\nendmodule\n";
        assert!(run_rule(&BlockingInSequential, text).is_empty());
    }

    #[test]
    fn one_per_assignment() {
        let text = "module m(input clk, d, output reg q, r);\n  always @(posedge clk) begin\n    q = d;\n    if (d) r = q; else r = 0;\n  end\nendmodule\n";
        assert_eq!(run_rule(&BlockingInSequential, text).len(), 3);
    }
}
