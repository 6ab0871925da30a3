//! R303: Memory array suggesting block RAM inference.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;

use crate::helpers::finding;
use crate::LintRule;

/// Flags declared 2-D `reg` arrays, which synthesis maps to block RAM or
/// distributed memory.
pub struct BramInference;

impl LintRule for BramInference {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Resource, 303)
    }

    fn name(&self) -> &str {
        "bram_inference"
    }

    fn description(&self) -> &str {
        "memory array will likely map to block RAM"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, model: &DesignModel, _source: &SourceText, sink: &FindingSink) {
        for module in &model.modules {
            for signal in module.signals.iter().filter(|s| s.is_memory()) {
                let depth = signal.array_depth.unwrap_or(1);
                sink.emit(finding(
                    self,
                    signal.line,
                    format!(
                        "memory '{}' ({depth} x {} bits) will likely infer block RAM",
                        signal.name, signal.width
                    ),
                ));
            }
        }
    }
}
