//! Structural extraction of HDL source text.
//!
//! [`extract`] turns Verilog-like source into a [`DesignModel`] plus syntax
//! [`Finding`]s. It is pattern recognition over a practical subset of the
//! language, not a grammar-complete parser, and it never fails: malformed
//! input produces findings and a best-effort model.
//!
//! Comments and string literals are masked once, with offsets preserved.
//! Each construct kind is then located by an independent scan of the whole
//! masked text and attributed to the module whose `module ... endmodule`
//! range contains it. Line numbers come from the [`SourceText`] line index.

#![warn(missing_docs)]

mod assign;
mod block;
mod builder;
mod decl;
mod eval;
mod expr;
mod instance;
mod modules;
mod scan;
pub mod syntax;

use hdlscope_diagnostics::{Finding, FindingSink};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;
use log::debug;

/// Extracts the design model and syntax findings from `text`.
pub fn extract(text: &str) -> (DesignModel, Vec<Finding>) {
    extract_source(&SourceText::new(text))
}

/// Extracts from already prepared source text.
///
/// Syntax findings come first in check order: delimiter balance
/// (parentheses, brackets, `begin`/`end`), unterminated comments and
/// strings, missing `endmodule`s, then missing semicolons by line.
pub fn extract_source(source: &SourceText) -> (DesignModel, Vec<Finding>) {
    let sink = FindingSink::new();
    let spans = modules::find_modules(source.masked());
    syntax::check_balance(source, &sink);
    syntax::check_unterminated_comment(source, &sink);
    syntax::check_unterminated_string(source, &sink);
    syntax::check_missing_endmodule(source, &spans, &sink);
    syntax::check_missing_semicolons(source, &sink);
    let model = builder::build_model(source, &spans);
    debug!(
        "extracted {} modules, {} syntax findings",
        model.modules.len(),
        sink.len()
    );
    (model, sink.take_all())
}
