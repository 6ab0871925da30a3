//! Candidate optimizations and their scoring.

use hdlscope_arch::Architecture;
use hdlscope_estimate::Estimates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight of the frequency improvement in the score.
pub const FREQUENCY_WEIGHT: f64 = 0.4;
/// Weight of the area improvement in the score.
pub const AREA_WEIGHT: f64 = 0.3;
/// Weight of the power improvement in the score.
pub const POWER_WEIGHT: f64 = 0.3;

/// What an optimization changes relative to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterDelta {
    /// Use another architecture for the component.
    SwitchArchitecture {
        /// Baseline architecture, `None` for the generic model.
        from: Option<Architecture>,
        /// Proposed architecture.
        to: Architecture,
    },
    /// Insert pipeline registers.
    AddPipelineStages {
        /// Number of stages.
        stages: u32,
    },
    /// Lower the clock and supply together.
    ScaleVoltageFrequency {
        /// Proposed clock in MHz.
        frequency_mhz: f64,
        /// Proposed supply in V.
        voltage_v: f64,
    },
    /// Retarget another device.
    MigrateDevice {
        /// Baseline device.
        from: String,
        /// Proposed device.
        to: String,
    },
}

impl fmt::Display for ParameterDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterDelta::SwitchArchitecture { from, to } => match from {
                Some(from) => write!(f, "architecture {from} -> {to}"),
                None => write!(f, "architecture generic -> {to}"),
            },
            ParameterDelta::AddPipelineStages { stages } => write!(f, "+{stages} pipeline stages"),
            ParameterDelta::ScaleVoltageFrequency {
                frequency_mhz,
                voltage_v,
            } => write!(f, "{frequency_mhz:.1} MHz @ {voltage_v:.2} V"),
            ParameterDelta::MigrateDevice { from, to } => write!(f, "device {from} -> {to}"),
        }
    }
}

/// Frequency, area and power figures of one design point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Figures {
    pub frequency_mhz: f64,
    pub luts: u64,
    pub power_mw: f64,
}

impl Figures {
    pub(crate) fn of(estimates: &Estimates) -> Self {
        Self {
            frequency_mhz: estimates.timing.max_frequency_mhz,
            luts: estimates.resources.luts,
            power_mw: estimates.power.total_mw,
        }
    }
}

/// One ranked alternative to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    /// Human-readable summary.
    pub description: String,
    /// What changes.
    pub delta: ParameterDelta,
    /// Achievable frequency of the candidate, in MHz.
    pub frequency_mhz: f64,
    /// LUTs of the candidate.
    pub luts: u64,
    /// Total power of the candidate, in mW.
    pub power_mw: f64,
    /// Candidate minus baseline frequency.
    pub frequency_delta_mhz: f64,
    /// Candidate minus baseline LUTs.
    pub lut_delta: i64,
    /// Candidate minus baseline power.
    pub power_delta_mw: f64,
    /// `0.4 * frequency_ratio + 0.3 * area_ratio + 0.3 * power_ratio`.
    pub score: f64,
}

impl Optimization {
    pub(crate) fn new(
        description: String,
        delta: ParameterDelta,
        baseline: Figures,
        candidate: Figures,
    ) -> Self {
        Self {
            description,
            delta,
            frequency_mhz: candidate.frequency_mhz,
            luts: candidate.luts,
            power_mw: candidate.power_mw,
            frequency_delta_mhz: candidate.frequency_mhz - baseline.frequency_mhz,
            lut_delta: lut_delta(baseline.luts, candidate.luts),
            power_delta_mw: candidate.power_mw - baseline.power_mw,
            score: score(baseline, candidate),
        }
    }
}

/// Candidate minus baseline LUTs, clamped to the `i64` range.
fn lut_delta(baseline: u64, candidate: u64) -> i64 {
    let delta = i128::from(candidate) - i128::from(baseline);
    i64::try_from(delta).unwrap_or(if delta > 0 { i64::MAX } else { i64::MIN })
}

/// Weighted improvement score; 1.0 means "same as baseline".
pub(crate) fn score(baseline: Figures, candidate: Figures) -> f64 {
    let frequency_ratio = candidate.frequency_mhz / baseline.frequency_mhz;
    let area_ratio = baseline.luts.max(1) as f64 / candidate.luts.max(1) as f64;
    let power_ratio = baseline.power_mw / candidate.power_mw;
    FREQUENCY_WEIGHT * frequency_ratio + AREA_WEIGHT * area_ratio + POWER_WEIGHT * power_ratio
}
