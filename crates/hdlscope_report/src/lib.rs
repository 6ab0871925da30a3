//! The full analysis pipeline and its serializable report.
//!
//! [`analyze`] runs extraction, linting, design metrics, estimation and the
//! optimization advisor over one source text and collects everything into
//! an [`AnalysisReport`]. Estimation failures are recorded in the report
//! instead of aborting it, so syntax and lint results are always returned.

#![warn(missing_docs)]

pub mod pipeline;
pub mod report;

pub use pipeline::{analyze, AnalysisContext};
pub use report::AnalysisReport;
