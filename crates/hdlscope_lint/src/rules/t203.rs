//! T203: Clock input without a timing constraint.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::{DesignModel, PortDirection};
use hdlscope_source::SourceText;

use crate::helpers::finding;
use crate::LintRule;

/// Flags input ports whose name contains `clk` when the file mentions
/// neither `create_clock` nor `PERIOD` anywhere, comments included.
pub struct MissingTimingConstraint;

impl LintRule for MissingTimingConstraint {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Timing, 203)
    }

    fn name(&self) -> &str {
        "missing_timing_constraint"
    }

    fn description(&self) -> &str {
        "clock input has no create_clock or PERIOD constraint"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        let raw = source.original();
        if raw.contains("create_clock") || raw.contains("PERIOD") {
            return;
        }
        for module in &model.modules {
            for port in module
                .ports_with_direction(PortDirection::Input)
                .filter(|p| p.name.contains("clk"))
            {
                sink.emit(
                    finding(
                        self,
                        port.line,
                        format!("clock input '{}' has no timing constraint", port.name),
                    )
                    .with_fix(format!(
                        "add 'create_clock -period <ns> [get_ports {}]' to the constraints",
                        port.name
                    )),
                );
            }
        }
    }
}
