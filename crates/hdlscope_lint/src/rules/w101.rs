//! W101: Latch inferred from a combinational block without else/default.

use hdlscope_diagnostics::{Category, DiagnosticCode, FindingSink, Severity};
use hdlscope_model::{BlockKind, DesignModel};
use hdlscope_source::SourceText;

use crate::helpers::{contains_word, finding};
use crate::LintRule;

/// Detects combinational blocks containing `if` or `case` whose body never
/// mentions `else` or `default`.
///
/// This is a token check, not control-flow analysis: a single `else`
/// anywhere in the block silences it. The finding points at the block's
/// closing line.
pub struct InferredLatch;

impl LintRule for InferredLatch {
    fn code(&self) -> DiagnosticCode {
        DiagnosticCode::new(Category::Warning, 101)
    }

    fn name(&self) -> &str {
        "inferred_latch"
    }

    fn description(&self) -> &str {
        "combinational block has if without else or case without default"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, model: &DesignModel, _source: &SourceText, sink: &FindingSink) {
        for block in model.modules.iter().flat_map(|m| m.blocks.iter()) {
            if block.kind != BlockKind::Combinational {
                continue;
            }
            let body = &block.body;
            let conditional = ["if", "case", "casex", "casez"]
                .iter()
                .any(|w| contains_word(body, w));
            let covered = contains_word(body, "else") || contains_word(body, "default");
            if conditional && !covered {
                sink.emit(
                    finding(self, block.end_line, "latch inferred in combinational block")
                        .with_fix(
                            "add else/default branches or assign defaults at the top of the \
                             block",
                        )
                        .with_note("detected from missing else/default tokens, not control flow"),
                );
            }
        }
    }
}
