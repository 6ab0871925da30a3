//! Findings, severities, and rendering for hdlscope.
//!
//! Both the structural extractor (syntax findings) and the lint engine
//! (lint findings) report through the same [`Finding`] record. Findings are
//! plain data: created once, never mutated, and collected in source order.
//! The [`FindingSink`] accumulates them and [`TerminalRenderer`] formats
//! them for a terminal.

#![warn(missing_docs)]

pub mod code;
pub mod finding;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use finding::{Delimiter, Finding, Imbalance, ImbalanceKind};
pub use renderer::{FindingRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::FindingSink;
