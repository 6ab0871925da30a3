//! Procedural blocks (`always`, `always_ff`, `always_comb`) and their assignments.

use crate::assign::base_identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a procedural block, derived from its sensitivity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Edge-triggered logic (sensitivity mentions `posedge`/`negedge`).
    Sequential,
    /// Combinational logic (`@*`, `@(*)`, `always_comb`, or a list of plain signals).
    Combinational,
    /// Anything else, e.g. a single level-sensitive signal or an empty list.
    Unknown,
}

impl BlockKind {
    /// Classifies a block from its keyword and sensitivity-list text.
    ///
    /// `keyword` is one of `always`, `always_ff`, `always_comb`, `always_latch`.
    /// `sensitivity` is the text between `@(` and `)`, or `*` for `@*`.
    pub fn classify(keyword: &str, sensitivity: &str) -> Self {
        if keyword == "always_comb" {
            return BlockKind::Combinational;
        }
        let sens = sensitivity.trim();
        if contains_word(sens, "posedge") || contains_word(sens, "negedge") {
            return BlockKind::Sequential;
        }
        if keyword == "always_latch" {
            return BlockKind::Unknown;
        }
        if sens == "*" {
            return BlockKind::Combinational;
        }
        let signals = split_sensitivity(sens).count();
        if signals > 1 {
            BlockKind::Combinational
        } else {
            BlockKind::Unknown
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Sequential => write!(f, "sequential"),
            BlockKind::Combinational => write!(f, "combinational"),
            BlockKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A signal edge in a sensitivity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Rising edge.
    Posedge,
    /// Falling edge.
    Negedge,
}

/// One `posedge sig` / `negedge sig` entry of a sensitivity list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeSensitivity {
    /// The edge.
    pub edge: Edge,
    /// The signal name.
    pub signal: String,
}

/// An assignment inside a procedural block body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduralAssignment {
    /// Left-hand side text.
    pub lhs: String,
    /// Right-hand side text.
    pub rhs: String,
    /// `true` for `=`, `false` for `<=`.
    pub blocking: bool,
    /// Operator complexity of the right-hand side, counted like [`crate::Assignment`].
    pub complexity: u32,
    /// 1-based line of the assignment.
    pub line: u32,
}

impl ProceduralAssignment {
    /// The base identifier being written, if the lvalue has one.
    pub fn target(&self) -> Option<&str> {
        base_identifier(&self.lhs)
    }
}

/// A procedural block in a module body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduralBlock {
    /// The introducing keyword (`always`, `always_ff`, ...).
    pub keyword: String,
    /// Sensitivity-list text between the parentheses (`*` for `@*`).
    pub sensitivity: String,
    /// Block classification.
    pub kind: BlockKind,
    /// The statement text following the event control.
    pub body: String,
    /// 1-based line of the `always` keyword.
    pub line: u32,
    /// 1-based line where the block's statement ends (its closing `end`).
    pub end_line: u32,
    /// Signals read by the block's assignments, first-seen order.
    pub reads: Vec<String>,
    /// Signals written by the block's assignments, first-seen order.
    pub writes: Vec<String>,
    /// Procedural assignments in body order.
    pub assignments: Vec<ProceduralAssignment>,
}

impl ProceduralBlock {
    /// Parses the edge entries of the sensitivity list.
    pub fn edges(&self) -> Vec<EdgeSensitivity> {
        let mut edges = Vec::new();
        for item in split_sensitivity(&self.sensitivity) {
            let mut words = item.split_whitespace();
            let edge = match words.next() {
                Some("posedge") => Edge::Posedge,
                Some("negedge") => Edge::Negedge,
                _ => continue,
            };
            if let Some(signal) = words.next() {
                edges.push(EdgeSensitivity {
                    edge,
                    signal: signal.to_string(),
                });
            }
        }
        edges
    }
}

/// Splits a sensitivity list on `or` and `,`.
fn split_sensitivity(sens: &str) -> impl Iterator<Item = &str> {
    sens.split(',')
        .flat_map(|part| part.split(" or "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|w| w == word)
}
