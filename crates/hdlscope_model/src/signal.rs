//! Internal signal declarations (`wire` / `reg`).

use serde::{Deserialize, Serialize};

/// The net kind of a declared signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// A `wire` net.
    Wire,
    /// A `reg` (or SystemVerilog `logic`) variable.
    Reg,
}

/// A signal declared inside a module body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// The signal name.
    pub name: String,
    /// Whether this is a wire or a reg.
    pub kind: SignalKind,
    /// Bit width of one element, computed like a port width.
    pub width: u32,
    /// The packed range text as written.
    pub range: Option<String>,
    /// Element count of an unpacked dimension (`reg [7:0] mem [0:255]`).
    pub array_depth: Option<u32>,
    /// 1-based line of the signal name.
    pub line: u32,
}

impl Signal {
    /// Returns `true` for a 2-D `reg` array, the usual memory idiom.
    pub fn is_memory(&self) -> bool {
        self.kind == SignalKind::Reg && self.array_depth.is_some()
    }

    /// Total storage bits: width times array depth.
    pub fn total_bits(&self) -> u64 {
        u64::from(self.width) * u64::from(self.array_depth.unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem(kind: SignalKind, depth: Option<u32>) -> Signal {
        Signal {
            name: "mem".into(),
            kind,
            width: 8,
            range: Some("7:0".into()),
            array_depth: depth,
            line: 1,
        }
    }

    #[test]
    fn memory_requires_reg_array() {
        assert!(mem(SignalKind::Reg, Some(256)).is_memory());
        assert!(!mem(SignalKind::Reg, None).is_memory());
        assert!(!mem(SignalKind::Wire, Some(4)).is_memory());
    }

    #[test]
    fn total_bits() {
        assert_eq!(mem(SignalKind::Reg, Some(256)).total_bits(), 2048);
        assert_eq!(mem(SignalKind::Wire, None).total_bits(), 8);
    }
}
