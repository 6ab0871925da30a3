//! R302: Multiply-accumulate pattern suggesting DSP inference.

use std::sync::LazyLock;

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;
use regex::Regex;

use crate::helpers::finding;
use crate::LintRule;

/// `@(*)`, `@*` and `(* attribute *)` stars are not multiplications.
static NON_ARITHMETIC_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\s*\(\s*\*\s*\)|@\s*\*|\(\*.*?\*\)").expect("star pattern is valid")
});

/// Flags lines containing both `*` and `+`, the usual shape of a
/// multiply-accumulate that maps onto a DSP slice.
pub struct DspInference;

impl LintRule for DspInference {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Resource, 302)
    }

    fn name(&self) -> &str {
        "dsp_inference"
    }

    fn description(&self) -> &str {
        "multiply-accumulate expression will likely map to a DSP block"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, _model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        for line in 1..=source.line_count() {
            let text = NON_ARITHMETIC_STAR.replace_all(source.masked_line(line), "");
            if text.contains('*') && text.contains('+') {
                sink.emit(
                    finding(self, line, "multiply-accumulate pattern will likely infer a DSP block")
                        .with_note("detected from '*' and '+' on the same line"),
                );
            }
        }
    }
}
