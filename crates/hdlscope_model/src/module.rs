//! A single `module ... endmodule` unit.

use crate::{Assignment, Instance, Parameter, Port, PortDirection, ProceduralBlock, Signal};
use serde::{Deserialize, Serialize};

/// A module and everything declared inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The module name.
    pub name: String,
    /// 1-based line of the `module` keyword.
    pub line: u32,
    /// 1-based line of `endmodule`, `None` when missing.
    pub end_line: Option<u32>,
    /// Header and body parameters in source order.
    pub parameters: Vec<Parameter>,
    /// Ports, unique by name.
    pub ports: Vec<Port>,
    /// Internal signals, unique by name.
    pub signals: Vec<Signal>,
    /// Instances of other modules.
    pub instances: Vec<Instance>,
    /// Procedural blocks.
    pub blocks: Vec<ProceduralBlock>,
    /// Continuous assignments.
    pub assignments: Vec<Assignment>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
            end_line: None,
            parameters: Vec::new(),
            ports: Vec::new(),
            signals: Vec::new(),
            instances: Vec::new(),
            blocks: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Looks up a signal by name.
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Iterates over ports of the given direction.
    pub fn ports_with_direction(&self, direction: PortDirection) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(move |p| p.direction == direction)
    }

    /// Width of a named port or signal, if declared.
    pub fn width_of(&self, name: &str) -> Option<u32> {
        self.port(name)
            .map(|p| p.width)
            .or_else(|| self.signal(name).map(|s| s.width))
    }
}
