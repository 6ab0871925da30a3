//! Static-analysis rules over an extracted design model.
//!
//! Each rule is an independent predicate over the [`DesignModel`] and the
//! source text. Several rules are deliberately lexical (line windows and
//! token presence rather than data-flow analysis); their findings carry a
//! note saying so.
//!
//! # Rule Categories
//!
//! - **T-series (timing):** clock-domain crossings, reset deassertion, clock constraints
//! - **W-series (warnings):** latches, combinational loops, assignment style, sensitivity lists
//! - **R-series (resources):** wide multiplexers, DSP and block RAM inference hints

#![warn(missing_docs)]

mod engine;
mod helpers;
mod rules;

pub use engine::LintEngine;
pub use rules::register_builtin_rules;
pub use rules::{
    AsyncResetSyncDeassert, BlockingInSequential, BramInference, CombinationalLoop,
    DspInference, EmptySensitivity, InferredLatch, MissingSynchronizer, MissingTimingConstraint,
    NonblockingInCombinational, WideMux,
};

use hdlscope_diagnostics::{DiagnosticCode, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;

/// A single lint rule over a design and its source text.
///
/// Each rule has a unique code, a snake_case rule id, a description and a
/// default severity. `check` emits findings in source order.
pub trait LintRule: Send + Sync {
    /// Returns the finding code for this rule (e.g. W101).
    fn code(&self) -> DiagnosticCode;

    /// Returns the snake_case rule id (e.g. "inferred_latch").
    fn name(&self) -> &str;

    /// Returns a human-readable description of what this rule checks.
    fn description(&self) -> &str;

    /// Returns the default severity of this rule's findings.
    fn default_severity(&self) -> Severity;

    /// Checks the design and emits findings to the sink.
    fn check(&self, model: &DesignModel, source: &SourceText, sink: &FindingSink);
}
