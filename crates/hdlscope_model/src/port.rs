//! Port definitions for module interfaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of a port on a module boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// An input port (data flows into the module).
    Input,
    /// An output port (data flows out of the module).
    Output,
    /// A bidirectional port.
    Inout,
}

impl PortDirection {
    /// Parses the Verilog direction keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "input" => Some(PortDirection::Input),
            "output" => Some(PortDirection::Output),
            "inout" => Some(PortDirection::Inout),
            _ => None,
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
            PortDirection::Inout => write!(f, "inout"),
        }
    }
}

/// A port in a module's external interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The port name.
    pub name: String,
    /// The direction of data flow.
    pub direction: PortDirection,
    /// Bit width: `|msb - lsb| + 1` of the packed range, 1 when absent or unresolved.
    pub width: u32,
    /// The packed range text as written, e.g. `WIDTH-1:0`.
    pub range: Option<String>,
    /// Whether the port is declared `reg` (e.g. `output reg q`).
    pub is_reg: bool,
    /// Whether the port is declared `signed`.
    pub signed: bool,
    /// 1-based line of the port name.
    pub line: u32,
}
