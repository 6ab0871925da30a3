//! Shared value types for device and architecture profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;
use thiserror::Error;

/// A name that does not match any variant of a closed catalog enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what}: '{input}'")]
pub struct ParseKindError {
    /// What was being parsed (e.g. "component kind").
    pub what: &'static str,
    /// The rejected input.
    pub input: String,
}

impl ParseKindError {
    pub(crate) fn new(what: &'static str, input: &str) -> Self {
        Self {
            what,
            input: input.to_string(),
        }
    }
}

/// Lowercases and maps `-` and spaces to `_`, for lenient name matching.
pub(crate) fn normalize_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Device speed grade, scaling every delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedGrade {
    /// Fastest bin (factor 0.75).
    Fastest,
    /// Middle bin (factor 0.85).
    Mid,
    /// Slowest bin (factor 1.0).
    #[default]
    Slowest,
}

impl SpeedGrade {
    /// All grades, fastest first.
    pub const ALL: [SpeedGrade; 3] = [SpeedGrade::Fastest, SpeedGrade::Mid, SpeedGrade::Slowest];

    /// Delay multiplier for this grade.
    pub fn factor(self) -> f64 {
        match self {
            SpeedGrade::Fastest => 0.75,
            SpeedGrade::Mid => 0.85,
            SpeedGrade::Slowest => 1.0,
        }
    }
}

impl FromStr for SpeedGrade {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "fastest" | "fast" | "_3" | "3" => Ok(SpeedGrade::Fastest),
            "mid" | "medium" | "_2" | "2" => Ok(SpeedGrade::Mid),
            "slowest" | "slow" | "_1" | "1" => Ok(SpeedGrade::Slowest),
            _ => Err(ParseKindError::new("speed grade", s)),
        }
    }
}

impl fmt::Display for SpeedGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedGrade::Fastest => write!(f, "fastest"),
            SpeedGrade::Mid => write!(f, "mid"),
            SpeedGrade::Slowest => write!(f, "slowest"),
        }
    }
}

/// Package family, which sets the junction-to-ambient thermal resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageKind {
    /// Flip-chip BGA with a lid.
    FlipChipBga,
    /// Wire-bond BGA.
    WireBondBga,
    /// Chip-scale package.
    Csp,
    /// Quad flat no-lead.
    Qfn,
}

impl PackageKind {
    /// Junction-to-ambient thermal resistance in °C/W, still air.
    pub fn theta_ja(self) -> f64 {
        match self {
            PackageKind::FlipChipBga => 9.5,
            PackageKind::WireBondBga => 15.0,
            PackageKind::Csp => 22.0,
            PackageKind::Qfn => 30.0,
        }
    }
}

impl FromStr for PackageKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "flip_chip_bga" | "fcbga" => Ok(PackageKind::FlipChipBga),
            "wire_bond_bga" | "bga" => Ok(PackageKind::WireBondBga),
            "csp" => Ok(PackageKind::Csp),
            "qfn" => Ok(PackageKind::Qfn),
            _ => Err(ParseKindError::new("package", s)),
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::FlipChipBga => write!(f, "flip_chip_bga"),
            PackageKind::WireBondBga => write!(f, "wire_bond_bga"),
            PackageKind::Csp => write!(f, "csp"),
            PackageKind::Qfn => write!(f, "qfn"),
        }
    }
}

/// Fractional resource usage from an area formula, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Look-up tables.
    pub luts: f64,
    /// Flip-flops.
    pub ffs: f64,
    /// Block RAM tiles.
    pub brams: f64,
    /// DSP blocks.
    pub dsps: f64,
}

impl ResourceUsage {
    /// Usage with only LUTs and flip-flops.
    pub fn logic(luts: f64, ffs: f64) -> Self {
        Self {
            luts,
            ffs,
            ..Self::default()
        }
    }
}

impl Add for ResourceUsage {
    type Output = ResourceUsage;

    fn add(self, rhs: ResourceUsage) -> ResourceUsage {
        ResourceUsage {
            luts: self.luts + rhs.luts,
            ffs: self.ffs + rhs.ffs,
            brams: self.brams + rhs.brams,
            dsps: self.dsps + rhs.dsps,
        }
    }
}

impl Mul<f64> for ResourceUsage {
    type Output = ResourceUsage;

    fn mul(self, k: f64) -> ResourceUsage {
        ResourceUsage {
            luts: self.luts * k,
            ffs: self.ffs * k,
            brams: self.brams * k,
            dsps: self.dsps * k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_grade_parse() {
        assert_eq!("fastest".parse::<SpeedGrade>(), Ok(SpeedGrade::Fastest));
        assert_eq!("-2".parse::<SpeedGrade>(), Ok(SpeedGrade::Mid));
        assert_eq!("Slowest".parse::<SpeedGrade>(), Ok(SpeedGrade::Slowest));
        assert!("ludicrous".parse::<SpeedGrade>().is_err());
        assert_eq!(SpeedGrade::default(), SpeedGrade::Slowest);
    }

    #[test]
    fn speed_factors_ordered() {
        assert!(SpeedGrade::Fastest.factor() < SpeedGrade::Mid.factor());
        assert!(SpeedGrade::Mid.factor() < SpeedGrade::Slowest.factor());
    }

    #[test]
    fn package_theta() {
        assert_eq!(PackageKind::FlipChipBga.theta_ja(), 9.5);
        assert!(PackageKind::Qfn.theta_ja() > PackageKind::Csp.theta_ja());
        assert_eq!("fcbga".parse::<PackageKind>(), Ok(PackageKind::FlipChipBga));
    }

    #[test]
    fn usage_arithmetic() {
        let a = ResourceUsage::logic(10.0, 4.0);
        let b = ResourceUsage {
            brams: 1.0,
            ..ResourceUsage::default()
        };
        let sum = (a + b) * 2.0;
        assert_eq!(sum.luts, 20.0);
        assert_eq!(sum.ffs, 8.0);
        assert_eq!(sum.brams, 2.0);
        assert_eq!(sum.dsps, 0.0);
    }

    #[test]
    fn parse_error_message() {
        let err = "x".parse::<SpeedGrade>().unwrap_err();
        assert_eq!(err.to_string(), "unknown speed grade: 'x'");
    }
}
