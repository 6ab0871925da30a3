//! T202: Asynchronous reset without synchronized deassertion.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;

use crate::helpers::{finding, lone_negedge_blocks};
use crate::LintRule;

/// Detects `negedge`-sensitive sequential blocks with no `posedge` line in
/// the following ten source lines, suggesting the reset is released
/// asynchronously.
pub struct AsyncResetSyncDeassert;

impl LintRule for AsyncResetSyncDeassert {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Timing, 202)
    }

    fn name(&self) -> &str {
        "async_reset_sync_deassert"
    }

    fn description(&self) -> &str {
        "asynchronous reset may be deasserted without synchronization"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        for block in lone_negedge_blocks(model, source) {
            sink.emit(
                finding(
                    self,
                    block.line,
                    "asynchronous reset is not followed by a synchronized deassertion",
                )
                .with_fix(
                    "assert the reset asynchronously but release it through a reset \
                     synchronizer",
                ),
            );
        }
    }
}
