//! Target device profiles and the catalog that looks them up by name.

use crate::types::{normalize_key, PackageKind};
use serde::Serialize;
use std::fmt;

/// Name of the device used when no device is configured.
pub const DEFAULT_DEVICE: &str = "Artix-7";

/// FPGA vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Vendor {
    /// AMD Xilinx.
    Xilinx,
    /// Intel (Altera).
    Intel,
    /// Lattice Semiconductor.
    Lattice,
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Xilinx => write!(f, "Xilinx"),
            Vendor::Intel => write!(f, "Intel"),
            Vendor::Lattice => write!(f, "Lattice"),
        }
    }
}

/// Immutable description of one target device.
///
/// Delays are in nanoseconds at the slowest speed grade and 25 °C. Dynamic
/// power coefficients are in mW per MHz per active resource, before the
/// toggle rate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceProfile {
    /// Canonical display name (e.g. "Artix-7").
    pub name: &'static str,
    /// Alternative names accepted by lookup, including representative part numbers.
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    /// Device vendor.
    pub vendor: Vendor,
    /// Representative part this profile's capacities are taken from.
    pub part: &'static str,
    /// Inputs per LUT.
    pub lut_inputs: u32,
    /// Look-up tables available.
    pub luts: u32,
    /// Flip-flops available.
    pub ffs: u32,
    /// Block RAM tiles available.
    pub brams: u32,
    /// Size of one block RAM tile in kilobits.
    pub bram_kbits: u32,
    /// DSP / hard multiplier blocks available.
    pub dsps: u32,
    /// User I/O pins available.
    pub ios: u32,
    /// Delay through one LUT level including local interconnect.
    pub lut_delay_ns: f64,
    /// Carry chain delay per bit.
    pub carry_delay_ns: f64,
    /// Delay through one DSP block.
    pub dsp_delay_ns: f64,
    /// Block RAM clock-to-out.
    pub bram_delay_ns: f64,
    /// Flip-flop clock-to-Q.
    pub clk_to_q_ns: f64,
    /// Flip-flop setup time.
    pub setup_ns: f64,
    /// Routing delay as a fraction of logic delay at fanout 1.
    pub routing_factor: f64,
    /// Static power at 25 °C and 1.0 V, in mW.
    pub power_base_mw: f64,
    /// Dynamic power per LUT.
    pub power_per_lut: f64,
    /// Dynamic power per flip-flop.
    pub power_per_ff: f64,
    /// Dynamic power per block RAM tile.
    pub power_per_bram: f64,
    /// Dynamic power per DSP block.
    pub power_per_dsp: f64,
    /// Dynamic power per I/O pin.
    pub power_per_io: f64,
    /// Highest supported fabric clock in MHz.
    pub max_frequency_mhz: f64,
    /// Delay and leakage growth per 10 °C above 25 °C.
    pub temperature_factor: f64,
    /// Exponent applied to the supply voltage in the static power model.
    pub voltage_exponent: f64,
    /// Nominal package.
    pub package: PackageKind,
}

impl DeviceProfile {
    /// Returns true if `name` matches this profile's name or one of its aliases.
    ///
    /// Matching ignores ASCII case and treats `-`, `_` and spaces as equal.
    pub fn matches(&self, name: &str) -> bool {
        let key = normalize_key(name);
        normalize_key(self.name) == key || self.aliases.iter().any(|a| normalize_key(a) == key)
    }

    /// Temperature scaling factor at `temperature_c`.
    pub fn temperature_scale(&self, temperature_c: f64) -> f64 {
        self.temperature_factor.powf((temperature_c - 25.0) / 10.0)
    }

    /// Bits held by one block RAM tile.
    pub fn bram_bits(&self) -> u64 {
        u64::from(self.bram_kbits) * 1024
    }
}

/// Immutable table of supported devices, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct DeviceCatalog {
    devices: Vec<DeviceProfile>,
}

impl DeviceCatalog {
    /// Builds the catalog of all built-in devices, grouped by vendor.
    pub fn builtin() -> Self {
        let devices = crate::xilinx::DEVICES
            .iter()
            .chain(crate::intel::DEVICES)
            .chain(crate::lattice::DEVICES)
            .copied()
            .collect();
        Self { devices }
    }

    /// Builds a catalog from an explicit device list.
    pub fn from_profiles(devices: Vec<DeviceProfile>) -> Self {
        Self { devices }
    }

    /// Looks up a device by name or alias.
    pub fn get(&self, name: &str) -> Option<&DeviceProfile> {
        self.devices.iter().find(|d| d.matches(name))
    }

    /// The default device profile, if present in this catalog.
    pub fn default_device(&self) -> Option<&DeviceProfile> {
        self.get(DEFAULT_DEVICE)
    }

    /// All devices in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceProfile> {
        self.devices.iter()
    }

    /// Canonical names in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.devices.iter().map(|d| d.name).collect()
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if the catalog has no devices.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
