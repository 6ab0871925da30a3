//! Junction temperature from total power and package thermal resistance.

use crate::config::OperatingPoint;
use crate::power::PowerEstimate;
use hdlscope_arch::{DeviceProfile, PackageKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum recommended junction temperature in °C.
pub const MAX_JUNCTION_C: f64 = 85.0;

/// Margin above which a design is considered thermally safe.
const SAFE_MARGIN_C: f64 = 15.0;

/// Thermal verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalStatus {
    /// More than 15 °C of margin.
    Safe,
    /// Between 0 and 15 °C of margin.
    Marginal,
    /// No margin left.
    Critical,
}

impl ThermalStatus {
    /// Classifies a margin in °C.
    pub fn from_margin(margin_c: f64) -> Self {
        if margin_c > SAFE_MARGIN_C {
            ThermalStatus::Safe
        } else if margin_c > 0.0 {
            ThermalStatus::Marginal
        } else {
            ThermalStatus::Critical
        }
    }
}

impl fmt::Display for ThermalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermalStatus::Safe => write!(f, "safe"),
            ThermalStatus::Marginal => write!(f, "marginal"),
            ThermalStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Junction temperature estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalEstimate {
    /// Ambient temperature in °C.
    pub ambient_c: f64,
    /// Total power in W.
    pub power_w: f64,
    /// Package used for θja.
    pub package: PackageKind,
    /// Junction-to-ambient thermal resistance in °C/W.
    pub theta_ja: f64,
    /// Junction temperature in °C.
    pub junction_c: f64,
    /// `MAX_JUNCTION_C - junction_c`.
    pub margin_c: f64,
    /// Verdict for the margin.
    pub status: ThermalStatus,
}

pub(crate) fn thermal(
    device: &DeviceProfile,
    point: &OperatingPoint,
    power: &PowerEstimate,
) -> ThermalEstimate {
    let package = point.package.unwrap_or(device.package);
    let theta_ja = package.theta_ja();
    let power_w = power.total_w();
    let junction_c = point.temperature_c + power_w * theta_ja;
    let margin_c = MAX_JUNCTION_C - junction_c;
    ThermalEstimate {
        ambient_c: point.temperature_c,
        power_w,
        package,
        theta_ja,
        junction_c,
        margin_c,
        status: ThermalStatus::from_margin(margin_c),
    }
}
