//! Intel (Altera) Cyclone device profiles.
//!
//! Cyclone IV uses 4-input LEs with M9K memory and 18x18 embedded
//! multipliers. Cyclone V uses adaptive logic modules (counted here as
//! ALMs), M10K memory and variable-precision DSP blocks.

use crate::device::{DeviceProfile, Vendor};
use crate::types::PackageKind;

/// Cyclone IV E (EP4CE22).
pub const CYCLONE_IV: DeviceProfile = DeviceProfile {
    name: "Cyclone-IV",
    aliases: &["cyclone4", "cycloneiv", "cyclone_iv_e", "ep4ce22"],
    vendor: Vendor::Intel,
    part: "EP4CE22F17C6",
    lut_inputs: 4,
    luts: 22_320,
    ffs: 22_320,
    brams: 66,
    bram_kbits: 9,
    dsps: 66,
    ios: 153,
    lut_delay_ns: 0.65,
    carry_delay_ns: 0.07,
    dsp_delay_ns: 3.5,
    bram_delay_ns: 2.6,
    clk_to_q_ns: 0.5,
    setup_ns: 0.15,
    routing_factor: 0.6,
    power_base_mw: 90.0,
    power_per_lut: 0.005,
    power_per_ff: 0.0025,
    power_per_bram: 0.09,
    power_per_dsp: 0.2,
    power_per_io: 0.06,
    max_frequency_mhz: 250.0,
    temperature_factor: 1.05,
    voltage_exponent: 2.0,
    package: PackageKind::WireBondBga,
};

/// Cyclone V SE (5CSEMA5).
pub const CYCLONE_V: DeviceProfile = DeviceProfile {
    name: "Cyclone-V",
    aliases: &["cyclone5", "cyclonev", "5csema5"],
    vendor: Vendor::Intel,
    part: "5CSEMA5F31C6",
    lut_inputs: 6,
    luts: 32_070,
    ffs: 128_280,
    brams: 397,
    bram_kbits: 10,
    dsps: 87,
    ios: 457,
    lut_delay_ns: 0.55,
    carry_delay_ns: 0.06,
    dsp_delay_ns: 3.0,
    bram_delay_ns: 2.3,
    clk_to_q_ns: 0.45,
    setup_ns: 0.12,
    routing_factor: 0.55,
    power_base_mw: 150.0,
    power_per_lut: 0.0045,
    power_per_ff: 0.002,
    power_per_bram: 0.1,
    power_per_dsp: 0.24,
    power_per_io: 0.055,
    max_frequency_mhz: 350.0,
    temperature_factor: 1.045,
    voltage_exponent: 2.0,
    package: PackageKind::FlipChipBga,
};

/// All Intel profiles in catalog order.
pub const DEVICES: &[DeviceProfile] = &[CYCLONE_IV, CYCLONE_V];
