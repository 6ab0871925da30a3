//! Parameter and localparam declarations.

use serde::{Deserialize, Serialize};

/// Whether a constant is overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// `parameter`, overridable at instantiation.
    Parameter,
    /// `localparam`, fixed.
    Localparam,
}

/// A parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// `parameter` or `localparam`.
    pub kind: ParamKind,
    /// The value expression text.
    pub value: String,
    /// The folded integer value, when the expression is constant.
    pub evaluated: Option<i64>,
    /// 1-based line of the parameter name.
    pub line: u32,
}
