//! Continuous assignments (`assign lhs = rhs;`).

use serde::{Deserialize, Serialize};

/// A continuous assignment in a module body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Left-hand side text, e.g. `sum[3:0]`.
    pub lhs: String,
    /// Right-hand side expression text.
    pub rhs: String,
    /// Operator count + balanced parenthesis pairs + 2 × ternaries of the rhs.
    pub complexity: u32,
    /// 1-based line of the `assign` keyword.
    pub line: u32,
}

impl Assignment {
    /// The base identifier being driven (`sum` for `sum[3:0]`).
    ///
    /// Concatenation targets (`{c, s}`) have no single base and return `None`.
    pub fn target(&self) -> Option<&str> {
        base_identifier(&self.lhs)
    }
}

/// Returns the leading identifier of an lvalue, ignoring selects.
pub(crate) fn base_identifier(lvalue: &str) -> Option<&str> {
    let text = lvalue.trim_start();
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$'))
        .map_or(text.len(), |(i, _)| i);
    let ident = &text[..end];
    let starts_ok = ident
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok.then_some(ident)
}
