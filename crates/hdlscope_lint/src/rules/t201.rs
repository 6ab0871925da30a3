//! T201: Missing synchronizer after a `negedge` domain.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;

use crate::helpers::{finding, lone_negedge_blocks};
use crate::LintRule;

/// Detects `negedge`-sensitive sequential blocks whose outputs are not
/// picked up by a `posedge` stage within the next ten source lines.
///
/// Shares its trigger with T202; the two rules report the same block from
/// the clocking and the reset point of view.
pub struct MissingSynchronizer;

impl LintRule for MissingSynchronizer {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Timing, 201)
    }

    fn name(&self) -> &str {
        "missing_synchronizer"
    }

    fn description(&self) -> &str {
        "negedge-clocked logic is not followed by a posedge synchronizer stage"
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
                    "negedge-sensitive block has no posedge synchronizer stage nearby",
                )
                .with_fix("register the signal through a two-flop posedge synchronizer")
                .with_note("a posedge line is searched for in the following 10 lines"),
            );
        }
    }
}
