//! All built-in lint rule implementations.
//!
//! This module re-exports the individual rule types and provides
//! `register_builtin_rules`, which fixes the catalog order.

mod r301;
mod r302;
mod r303;
mod t201;
mod t202;
mod t203;
mod w101;
mod w102;
mod w103;
mod w104;
mod w105;

pub use r301::WideMux;
pub use r302::DspInference;
pub use r303::BramInference;
pub use t201::MissingSynchronizer;
pub use t202::AsyncResetSyncDeassert;
pub use t203::MissingTimingConstraint;
pub use w101::InferredLatch;
pub use w102::CombinationalLoop;
pub use w103::BlockingInSequential;
pub use w104::NonblockingInCombinational;
pub use w105::EmptySensitivity;

use crate::LintEngine;

/// Registers the 11 built-in rules in catalog order.
pub fn register_builtin_rules(engine: &mut LintEngine) {
    engine.register(Box::new(MissingSynchronizer));
    engine.register(Box::new(AsyncResetSyncDeassert));
    engine.register(Box::new(InferredLatch));
    engine.register(Box::new(CombinationalLoop));
    engine.register(Box::new(BlockingInSequential));
    engine.register(Box::new(NonblockingInCombinational));
    engine.register(Box::new(EmptySensitivity));
    engine.register(Box::new(WideMux));
    engine.register(Box::new(DspInference));
    engine.register(Box::new(BramInference));
    engine.register(Box::new(MissingTimingConstraint));
}
