//! Estimation requests: the operating point and the component description.

use crate::error::EstimateError;
use hdlscope_arch::{Architecture, ComponentKind, Dims, PackageKind, SpeedGrade, DEFAULT_DEVICE};
use hdlscope_common::Frequency;
use hdlscope_config::EstimateSection;
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Device and environment conditions an estimate is evaluated at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Device name or alias from the device catalog.
    pub device: String,
    /// Clock frequency in MHz.
    pub frequency_mhz: f64,
    /// Ambient temperature in °C.
    pub temperature_c: f64,
    /// Core supply voltage in V.
    pub voltage_v: f64,
    /// Device speed grade.
    pub speed_grade: SpeedGrade,
    /// Average net fanout for the routing model.
    pub fanout: u32,
    /// Average toggle rate in `[0, 1]`.
    pub toggle_rate: f64,
    /// Clock period setup slack is measured against, 10 ns by default.
    pub target_period_ns: f64,
    /// Package override; the device's nominal package when `None`.
    pub package: Option<PackageKind>,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            frequency_mhz: 100.0,
            temperature_c: 25.0,
            voltage_v: 1.0,
            speed_grade: SpeedGrade::Slowest,
            fanout: 4,
            toggle_rate: 0.25,
            target_period_ns: 10.0,
            package: None,
        }
    }
}

impl OperatingPoint {
    /// Builds an operating point from the `[estimate]` config section,
    /// falling back to the defaults for unset fields.
    pub fn from_section(section: &EstimateSection) -> Result<Self, EstimateError> {
        let mut point = Self::default();
        if let Some(device) = &section.device {
            point.device = device.clone();
        }
        if let Some(freq) = section
            .frequency()
            .map_err(|e| EstimateError::invalid("frequency", e.to_string()))?
        {
            point.frequency_mhz = freq.mhz();
        }
        if let Some(t) = section.temperature_c {
            point.temperature_c = t;
        }
        if let Some(v) = section.voltage_v {
            point.voltage_v = v;
        }
        if let Some(grade) = &section.speed_grade {
            point.speed_grade = parse_value("speed_grade", grade)?;
        }
        if let Some(fanout) = section.fanout {
            point.fanout = fanout;
        }
        if let Some(rate) = section.toggle_rate {
            point.toggle_rate = rate;
        }
        if let Some(period) = section.target_period_ns {
            point.target_period_ns = period;
        }
        Ok(point)
    }

    /// Applies one `key=value` override. Returns `false` if the key is not
    /// an operating-point key.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, EstimateError> {
        match key {
            "device" => self.device = value.trim().to_string(),
            "frequency" | "freq" | "clock" => {
                let freq: Frequency = parse_value("frequency", value)?;
                self.frequency_mhz = freq.mhz();
            }
            "temperature" | "temperature_c" => {
                self.temperature_c = parse_value("temperature", value)?
            }
            "voltage" | "voltage_v" => self.voltage_v = parse_value("voltage", value)?,
            "speed_grade" => self.speed_grade = parse_value("speed_grade", value)?,
            "fanout" => self.fanout = parse_value("fanout", value)?,
            "toggle_rate" => self.toggle_rate = parse_value("toggle_rate", value)?,
            "target_period" | "target_period_ns" => {
                self.target_period_ns = parse_value("target_period", value)?
            }
            "package" => self.package = Some(parse_value("package", value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Checks every numeric field's range.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !(self.frequency_mhz.is_finite() && self.frequency_mhz > 0.0) {
            return Err(EstimateError::invalid("frequency", "must be positive"));
        }
        if !(self.voltage_v.is_finite() && self.voltage_v > 0.0) {
            return Err(EstimateError::invalid("voltage", "must be positive"));
        }
        if !self.temperature_c.is_finite() {
            return Err(EstimateError::invalid("temperature", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.toggle_rate) {
            return Err(EstimateError::invalid(
                "toggle_rate",
                format!("{} is outside [0, 1]", self.toggle_rate),
            ));
        }
        if self.fanout == 0 {
            return Err(EstimateError::invalid("fanout", "must be at least 1"));
        }
        if !(self.target_period_ns.is_finite() && self.target_period_ns > 0.0) {
            return Err(EstimateError::invalid("target_period", "must be positive"));
        }
        Ok(())
    }
}

/// A request to estimate one datapath component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Component kind.
    pub component: ComponentKind,
    /// Architecture; `None` selects the generic width-based model.
    pub architecture: Option<Architecture>,
    /// Data width in bits.
    pub width: u32,
    /// Entry count; required for FIFOs.
    pub depth: Option<u32>,
    /// Number of identical instances.
    pub instances: u32,
    /// Operating conditions.
    #[serde(flatten)]
    pub point: OperatingPoint,
}

impl EstimateConfig {
    /// A single instance at the default operating point.
    pub fn new(component: ComponentKind, width: u32) -> Self {
        Self {
            component,
            architecture: None,
            width,
            depth: None,
            instances: 1,
            point: OperatingPoint::default(),
        }
    }

    /// Sets the architecture.
    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = Some(architecture);
        self
    }

    /// Sets the depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Sets the instance count.
    pub fn with_instances(mut self, instances: u32) -> Self {
        self.instances = instances;
        self
    }

    /// Sets the target device.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.point.device = device.into();
        self
    }

    /// Replaces the operating point.
    pub fn with_point(mut self, point: OperatingPoint) -> Self {
        self.point = point;
        self
    }

    /// Width and depth as architecture dimensions.
    pub fn dims(&self) -> Dims {
        Dims {
            width: self.width,
            depth: self.depth,
        }
    }

    /// Checks dimensions, instance count and the operating point.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.width == 0 {
            return Err(EstimateError::invalid("width", "must be at least 1"));
        }
        match self.depth {
            None if self.component.requires_depth() => {
                return Err(EstimateError::MissingParameter("depth"))
            }
            Some(0) => return Err(EstimateError::invalid("depth", "must be at least 1")),
            _ => {}
        }
        if self.instances == 0 {
            return Err(EstimateError::invalid("instances", "must be at least 1"));
        }
        self.point.validate()
    }

    /// Applies one `key=value` constraint string.
    ///
    /// Text without `=` and unknown keys are ignored; recognized keys with
    /// malformed values are errors.
    pub fn apply_constraint(&mut self, constraint: &str) -> Result<(), EstimateError> {
        let Some((key, value)) = constraint.split_once('=') else {
            debug!("ignoring free-form constraint '{constraint}'");
            return Ok(());
        };
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        let value = value.trim();
        match key.as_str() {
            "architecture" | "arch" => self.architecture = Some(self.parse_architecture(value)?),
            "width" => self.width = parse_value("width", value)?,
            "depth" => self.depth = Some(parse_value("depth", value)?),
            "instances" => self.instances = parse_value("instances", value)?,
            _ => {
                if !self.point.apply(&key, value)? {
                    debug!("ignoring unknown constraint key '{key}'");
                }
            }
        }
        Ok(())
    }

    pub(crate) fn parse_architecture(&self, name: &str) -> Result<Architecture, EstimateError> {
        name.parse().map_err(|_| EstimateError::UnknownArchitecture {
            component: self.component,
            architecture: name.to_string(),
        })
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, EstimateError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| EstimateError::invalid(name, format!("'{value}': {e}")))
}
