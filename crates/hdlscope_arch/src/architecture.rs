//! Component architectures and their closed-form delay and area formulas.
//!
//! Every [`ArchitectureProfile`] is keyed by a ([`ComponentKind`],
//! [`Architecture`]) pair. Delays are device-independent base delays in
//! nanoseconds; the estimation engine applies routing, temperature and
//! speed-grade scaling on top. Usage counts are per instance and may be
//! fractional until the engine rounds them.

use crate::types::{normalize_key, ParseKindError, ResourceUsage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bits in the block RAM tile the FIFO area formula is normalized to.
const BRAM_TILE_BITS: f64 = 36_864.0;

/// Kind of datapath component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Two-operand adder.
    Adder,
    /// Two-operand multiplier.
    Multiplier,
    /// First-in first-out buffer.
    Fifo,
    /// Free-running counter.
    Counter,
    /// Magnitude comparator.
    Comparator,
}

impl ComponentKind {
    /// All kinds in catalog order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Adder,
        ComponentKind::Multiplier,
        ComponentKind::Fifo,
        ComponentKind::Counter,
        ComponentKind::Comparator,
    ];

    /// Snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Adder => "adder",
            ComponentKind::Multiplier => "multiplier",
            ComponentKind::Fifo => "fifo",
            ComponentKind::Counter => "counter",
            ComponentKind::Comparator => "comparator",
        }
    }

    /// Returns true if this kind needs a depth as well as a width.
    pub fn requires_depth(self) -> bool {
        self == ComponentKind::Fifo
    }
}

impl FromStr for ComponentKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "adder" | "add" => Ok(ComponentKind::Adder),
            "multiplier" | "mult" | "mul" => Ok(ComponentKind::Multiplier),
            "fifo" | "queue" => Ok(ComponentKind::Fifo),
            "counter" => Ok(ComponentKind::Counter),
            "comparator" | "cmp" => Ok(ComponentKind::Comparator),
            _ => Err(ParseKindError::new("component kind", s)),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implementation architecture of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    /// Adder on the dedicated carry chain.
    RippleCarry,
    /// Carry-lookahead adder.
    CarryLookahead,
    /// Carry-select adder with duplicated upper blocks.
    CarrySelect,
    /// Kogge-Stone parallel-prefix adder.
    KoggeStone,
    /// Array multiplier of partial-product rows.
    Array,
    /// Wallace-tree multiplier.
    WallaceTree,
    /// Radix-4 Booth multiplier.
    Booth,
    /// FIFO in block RAM.
    BlockRam,
    /// FIFO in distributed LUT RAM.
    Distributed,
    /// FIFO built from shift-register LUTs.
    ShiftRegister,
    /// Binary up-counter.
    Binary,
    /// Gray-code counter.
    Gray,
    /// Johnson (twisted-ring) counter.
    Johnson,
    /// Linear-feedback shift register.
    Lfsr,
    /// Comparator on the carry chain.
    Parallel,
    /// Comparator as a reduction tree.
    Tree,
    /// Bit-serial comparator.
    Serial,
}

impl Architecture {
    /// Snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            Architecture::RippleCarry => "ripple_carry",
            Architecture::CarryLookahead => "carry_lookahead",
            Architecture::CarrySelect => "carry_select",
            Architecture::KoggeStone => "kogge_stone",
            Architecture::Array => "array",
            Architecture::WallaceTree => "wallace_tree",
            Architecture::Booth => "booth",
            Architecture::BlockRam => "block_ram",
            Architecture::Distributed => "distributed",
            Architecture::ShiftRegister => "shift_register",
            Architecture::Binary => "binary",
            Architecture::Gray => "gray",
            Architecture::Johnson => "johnson",
            Architecture::Lfsr => "lfsr",
            Architecture::Parallel => "parallel",
            Architecture::Tree => "tree",
            Architecture::Serial => "serial",
        }
    }
}

impl FromStr for Architecture {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arch = match normalize_key(s).as_str() {
            "ripple_carry" | "ripple" => Architecture::RippleCarry,
            "carry_lookahead" | "cla" => Architecture::CarryLookahead,
            "carry_select" => Architecture::CarrySelect,
            "kogge_stone" => Architecture::KoggeStone,
            "array" => Architecture::Array,
            "wallace_tree" | "wallace" => Architecture::WallaceTree,
            "booth" => Architecture::Booth,
            "block_ram" | "bram" => Architecture::BlockRam,
            "distributed" | "lutram" => Architecture::Distributed,
            "shift_register" | "srl" => Architecture::ShiftRegister,
            "binary" => Architecture::Binary,
            "gray" => Architecture::Gray,
            "johnson" => Architecture::Johnson,
            "lfsr" => Architecture::Lfsr,
            "parallel" => Architecture::Parallel,
            "tree" => Architecture::Tree,
            "serial" => Architecture::Serial,
            _ => return Err(ParseKindError::new("architecture", s)),
        };
        Ok(arch)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Component dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    /// Data width in bits.
    pub width: u32,
    /// Entry count, for kinds that store data.
    pub depth: Option<u32>,
}

impl Dims {
    /// Dimensions with a width only.
    pub fn new(width: u32) -> Self {
        Self { width, depth: None }
    }

    /// Dimensions with a width and depth.
    pub fn with_depth(width: u32, depth: u32) -> Self {
        Self {
            width,
            depth: Some(depth),
        }
    }
}

fn clog2(n: u32) -> f64 {
    f64::from(n.max(2)).log2().ceil()
}

/// One (component kind, architecture) entry with its formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArchitectureProfile {
    /// Component kind this entry implements.
    pub component: ComponentKind,
    /// Architecture of the implementation.
    pub architecture: Architecture,
    /// One-line description.
    pub description: &'static str,
}

impl ArchitectureProfile {
    const fn new(
        component: ComponentKind,
        architecture: Architecture,
        description: &'static str,
    ) -> Self {
        Self {
            component,
            architecture,
            description,
        }
    }

    /// Base logic delay in ns for the given dimensions.
    ///
    /// Depth is only consulted by FIFO architectures and is treated as 1
    /// when absent; callers validate it beforehand.
    pub fn delay_ns(&self, dims: Dims) -> f64 {
        let w = f64::from(dims.width.max(1));
        let lw = clog2(dims.width);
        let la = clog2(dims.depth.unwrap_or(1));
        match self.architecture {
            Architecture::RippleCarry => 0.5 + 0.1 * w,
            Architecture::CarryLookahead => 0.8 + 0.3 * lw,
            Architecture::CarrySelect => 0.6 + 0.25 * w.sqrt(),
            Architecture::KoggeStone => 0.5 + 0.2 * lw,
            Architecture::Array => 1.0 + 0.2 * w,
            Architecture::WallaceTree => 1.5 + 0.6 * lw,
            Architecture::Booth => 1.0 + 0.12 * w,
            Architecture::BlockRam => 2.0 + 0.1 * la,
            Architecture::Distributed => 1.0 + 0.15 * la,
            Architecture::ShiftRegister => 0.7 + 0.1 * la,
            Architecture::Binary => 0.5 + 0.05 * w,
            Architecture::Gray => 0.8 + 0.08 * w,
            Architecture::Johnson => 0.4,
            Architecture::Lfsr => 0.45,
            Architecture::Parallel => 0.5 + 0.04 * w,
            Architecture::Tree => 0.4 + 0.25 * lw,
            Architecture::Serial => 0.35,
        }
    }

    /// Per-instance LUT, flip-flop and block RAM usage.
    pub fn usage(&self, dims: Dims) -> ResourceUsage {
        let w = f64::from(dims.width.max(1));
        let lw = clog2(dims.width);
        let d = f64::from(dims.depth.unwrap_or(1).max(1));
        let la = clog2(dims.depth.unwrap_or(1));
        match self.architecture {
            Architecture::RippleCarry => ResourceUsage::logic(w, 0.0),
            Architecture::CarryLookahead => ResourceUsage::logic(1.5 * w, 0.0),
            Architecture::CarrySelect => ResourceUsage::logic(2.2 * w, 0.0),
            Architecture::KoggeStone => ResourceUsage::logic(w * lw + w, 0.0),
            Architecture::Array => ResourceUsage::logic(w * w, 0.0),
            Architecture::WallaceTree => ResourceUsage::logic(1.2 * w * w, 0.0),
            Architecture::Booth => ResourceUsage::logic(0.6 * w * w + w, 0.0),
            Architecture::BlockRam => ResourceUsage {
                luts: 2.0 * la + 10.0,
                ffs: 2.0 * la + 4.0,
                brams: (w * d / BRAM_TILE_BITS).ceil().max(1.0),
                dsps: 0.0,
            },
            Architecture::Distributed => {
                ResourceUsage::logic((w * d / 64.0).ceil() + 2.0 * la, 2.0 * la + w)
            }
            Architecture::ShiftRegister => {
                ResourceUsage::logic(w * (d / 32.0).ceil() + la, la + w)
            }
            Architecture::Binary => ResourceUsage::logic(w, w),
            Architecture::Gray => ResourceUsage::logic(2.0 * w, w),
            Architecture::Johnson => ResourceUsage::logic(1.0, w),
            Architecture::Lfsr => ResourceUsage::logic(1.0 + (w / 6.0).ceil(), w),
            Architecture::Parallel => ResourceUsage::logic((w / 2.0).ceil() + 1.0, 0.0),
            Architecture::Tree => ResourceUsage::logic(1.5 * w, 0.0),
            Architecture::Serial => ResourceUsage::logic(3.0, 2.0 + lw),
        }
    }
}

const BUILTIN: &[ArchitectureProfile] = &[
    ArchitectureProfile::new(
        ComponentKind::Adder,
        Architecture::RippleCarry,
        "carry-chain ripple adder; smallest, delay linear in width",
    ),
    ArchitectureProfile::new(
        ComponentKind::Adder,
        Architecture::CarryLookahead,
        "lookahead carry generation; logarithmic delay",
    ),
    ArchitectureProfile::new(
        ComponentKind::Adder,
        Architecture::CarrySelect,
        "duplicated upper blocks selected by the carry; square-root delay",
    ),
    ArchitectureProfile::new(
        ComponentKind::Adder,
        Architecture::KoggeStone,
        "parallel-prefix adder; fastest, largest",
    ),
    ArchitectureProfile::new(
        ComponentKind::Multiplier,
        Architecture::Array,
        "rows of partial-product adders",
    ),
    ArchitectureProfile::new(
        ComponentKind::Multiplier,
        Architecture::WallaceTree,
        "carry-save reduction tree; logarithmic delay",
    ),
    ArchitectureProfile::new(
        ComponentKind::Multiplier,
        Architecture::Booth,
        "radix-4 Booth recoding halves the partial products",
    ),
    ArchitectureProfile::new(
        ComponentKind::Fifo,
        Architecture::BlockRam,
        "storage in block RAM with LUT pointer logic",
    ),
    ArchitectureProfile::new(
        ComponentKind::Fifo,
        Architecture::Distributed,
        "storage in distributed LUT RAM",
    ),
    ArchitectureProfile::new(
        ComponentKind::Fifo,
        Architecture::ShiftRegister,
        "storage in shift-register LUTs with an addressed tap",
    ),
    ArchitectureProfile::new(
        ComponentKind::Counter,
        Architecture::Binary,
        "binary up-counter on the carry chain",
    ),
    ArchitectureProfile::new(
        ComponentKind::Counter,
        Architecture::Gray,
        "Gray-code counter; one bit toggles per step",
    ),
    ArchitectureProfile::new(
        ComponentKind::Counter,
        Architecture::Johnson,
        "twisted-ring counter; 2n states from n flip-flops",
    ),
    ArchitectureProfile::new(
        ComponentKind::Counter,
        Architecture::Lfsr,
        "maximal-length LFSR; pseudo-random sequence",
    ),
    ArchitectureProfile::new(
        ComponentKind::Comparator,
        Architecture::Parallel,
        "magnitude compare on the carry chain",
    ),
    ArchitectureProfile::new(
        ComponentKind::Comparator,
        Architecture::Tree,
        "reduction-tree compare; logarithmic delay",
    ),
    ArchitectureProfile::new(
        ComponentKind::Comparator,
        Architecture::Serial,
        "bit-serial compare over width cycles",
    ),
];

/// Immutable table of architecture profiles, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct ArchitectureCatalog {
    profiles: Vec<ArchitectureProfile>,
}

impl ArchitectureCatalog {
    /// Builds the catalog of all built-in architectures in registration order.
    pub fn builtin() -> Self {
        Self {
            profiles: BUILTIN.to_vec(),
        }
    }

    /// Builds a catalog from an explicit profile list.
    pub fn from_profiles(profiles: Vec<ArchitectureProfile>) -> Self {
        Self { profiles }
    }

    /// Looks up the profile registered for `(component, architecture)`.
    pub fn get(
        &self,
        component: ComponentKind,
        architecture: Architecture,
    ) -> Option<&ArchitectureProfile> {
        self.profiles
            .iter()
            .find(|p| p.component == component && p.architecture == architecture)
    }

    /// Profiles registered for `component`, in registration order.
    pub fn for_component(
        &self,
        component: ComponentKind,
    ) -> impl Iterator<Item = &ArchitectureProfile> {
        self.profiles.iter().filter(move |p| p.component == component)
    }

    /// The first profile registered for `component`.
    pub fn default_for(&self, component: ComponentKind) -> Option<&ArchitectureProfile> {
        self.for_component(component).next()
    }

    /// All profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArchitectureProfile> {
        self.profiles.iter()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if the catalog has no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ArchitectureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
