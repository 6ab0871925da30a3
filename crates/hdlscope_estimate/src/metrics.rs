//! Structural metrics of an extracted design, the input to design-level estimation.

use hdlscope_model::{BlockKind, DesignModel, Module};
use log::debug;
use serde::{Deserialize, Serialize};

/// Size and depth figures derived from a [`DesignModel`].
///
/// Each module is counted once regardless of how often it is instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesignMetrics {
    /// Number of modules.
    pub modules: u32,
    /// Port bits of the top-level modules.
    pub io_bits: u64,
    /// Bits of non-memory registers written in sequential blocks.
    pub register_bits: u64,
    /// Bits held in 2-D `reg` arrays.
    pub memory_bits: u64,
    /// Binary `*` operators on assignment right-hand sides.
    pub multipliers: u32,
    /// Binary `+`/`-` operators on assignment right-hand sides.
    pub adders: u32,
    /// Largest single expression complexity.
    pub max_complexity: u32,
    /// Sum of all expression complexities.
    pub total_complexity: u64,
    /// `max(1, ceil(max_complexity / 2))`.
    pub logic_levels: u32,
    /// Widest port or non-memory signal, at least 1.
    pub datapath_width: u32,
}

impl DesignMetrics {
    /// Derives metrics from an extracted design.
    pub fn from_model(model: &DesignModel) -> Self {
        let mut m = DesignMetrics {
            modules: model.modules.len() as u32,
            datapath_width: 1,
            ..DesignMetrics::default()
        };

        let tops = model.top_modules();
        let io_modules: Vec<&Module> = if tops.is_empty() {
            model.modules.iter().collect()
        } else {
            tops
        };
        m.io_bits = io_modules
            .iter()
            .flat_map(|module| module.ports.iter())
            .map(|p| u64::from(p.width))
            .sum();

        for module in &model.modules {
            m.accumulate(module);
        }
        m.logic_levels = m.max_complexity.div_ceil(2).max(1);
        debug!(
            "metrics: {} modules, {} io bits, {} register bits, {} memory bits, {} levels",
            m.modules, m.io_bits, m.register_bits, m.memory_bits, m.logic_levels
        );
        m
    }

    fn accumulate(&mut self, module: &Module) {
        let widths = module
            .ports
            .iter()
            .map(|p| p.width)
            .chain(module.signals.iter().filter(|s| !s.is_memory()).map(|s| s.width));
        for w in widths {
            self.datapath_width = self.datapath_width.max(w);
        }

        self.memory_bits += module
            .signals
            .iter()
            .filter(|s| s.is_memory())
            .map(|s| s.total_bits())
            .sum::<u64>();

        let mut registers: Vec<&str> = Vec::new();
        for block in module.blocks.iter().filter(|b| b.kind == BlockKind::Sequential) {
            for name in &block.writes {
                if !registers.contains(&name.as_str()) {
                    registers.push(name);
                }
            }
        }
        self.register_bits += registers
            .iter()
            .filter(|name| !module.signal(name).is_some_and(|s| s.is_memory()))
            .map(|name| u64::from(module.width_of(name).unwrap_or(1)))
            .sum::<u64>();

        let continuous = module.assignments.iter().map(|a| (a.rhs.as_str(), a.complexity));
        let procedural = module
            .blocks
            .iter()
            .flat_map(|b| b.assignments.iter())
            .map(|a| (a.rhs.as_str(), a.complexity));
        for (rhs, complexity) in continuous.chain(procedural) {
            let (mults, adds) = count_arithmetic(rhs);
            self.multipliers += mults;
            self.adders += adds;
            self.max_complexity = self.max_complexity.max(complexity);
            self.total_complexity += u64::from(complexity);
        }
    }
}

/// Counts binary `*` (not `**`) and binary `+`/`-` (not part-select `+:`/`-:`).
fn count_arithmetic(expr: &str) -> (u32, u32) {
    let bytes = expr.as_bytes();
    let mut mults = 0;
    let mut adds = 0;
    let mut prev: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        let next = bytes.get(i + 1).copied();
        match b {
            b'*' => {
                if next != Some(b'*') && prev != Some(b'*') {
                    mults += 1;
                }
            }
            b'+' | b'-' => {
                let binary = prev.is_some_and(|p| {
                    p.is_ascii_alphanumeric() || matches!(p, b'_' | b')' | b']' | b'\'')
                });
                if binary && next != Some(b':') {
                    adds += 1;
                }
            }
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            prev = Some(b);
        }
    }
    (mults, adds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: &str = "\
module mac (
    input clk,
    input [7:0] a,
    input [7:0] b,
    output reg [15:0] acc
);
    reg [7:0] buffer [0:63];
    wire [15:0] prod;
    assign prod = a * b;
    always @(posedge clk) begin
        acc <= acc + prod;
        buffer[0] <= a;
    end
endmodule
";

    #[test]
    fn mac_metrics() {
        let (model, _) = hdlscope_extract::extract(MAC);
        let m = DesignMetrics::from_model(&model);
        assert_eq!(m.modules, 1);
        assert_eq!(m.io_bits, 1 + 8 + 8 + 16);
        assert_eq!(m.register_bits, 16);
        assert_eq!(m.memory_bits, 8 * 64);
        assert_eq!(m.multipliers, 1);
        assert_eq!(m.adders, 1);
        assert_eq!(m.datapath_width, 16);
        assert_eq!(m.logic_levels, 1);
    }

    #[test]
    fn empty_model() {
        let m = DesignMetrics::from_model(&DesignModel::new());
        assert_eq!(m.modules, 0);
        assert_eq!(m.io_bits, 0);
        assert_eq!(m.logic_levels, 1);
        assert_eq!(m.datapath_width, 1);
    }

    #[test]
    fn only_top_level_ports_count_as_io() {
        let src = "\
module leaf(input [3:0] x, output [3:0] y);
    assign y = ~x;
endmodule
module top(input [7:0] i, output [7:0] o);
    leaf u0 (.x(i[3:0]), .y(o[3:0]));
    leaf u1 (.x(i[7:4]), .y(o[7:4]));
endmodule
";
        let (model, _) = hdlscope_extract::extract(src);
        let m = DesignMetrics::from_model(&model);
        assert_eq!(m.io_bits, 16);
    }

    #[test]
    fn levels_from_complexity() {
        let src = "\
module deep(input [7:0] a, b, c, d, output [7:0] y);
    assign y = ((a + b) & (c | d)) ^ (a - d);
endmodule
";
        let (model, _) = hdlscope_extract::extract(src);
        let m = DesignMetrics::from_model(&model);
        assert!(m.max_complexity >= 5);
        assert_eq!(m.logic_levels, m.max_complexity.div_ceil(2));
        assert_eq!(m.adders, 2);
    }

    #[test]
    fn arithmetic_counting() {
        assert_eq!(count_arithmetic("a * b + c"), (1, 1));
        assert_eq!(count_arithmetic("2 ** n"), (0, 0));
        assert_eq!(count_arithmetic("-a"), (0, 0));
        assert_eq!(count_arithmetic("data[i +: 8]"), (0, 0));
        assert_eq!(count_arithmetic("(a) - (b)"), (0, 1));
        assert_eq!(count_arithmetic("x - 8'd1"), (0, 1));
    }
}
