//! Xilinx (AMD) 7-series device profiles.
//!
//! 7-series fabric uses 6-input LUTs in SLICEL/SLICEM slices, 36Kb block
//! RAMs and DSP48E1 slices (25x18 multiply). Capacities are those of the
//! representative part named in each profile.

use crate::device::{DeviceProfile, Vendor};
use crate::types::PackageKind;

/// Artix-7 (xc7a35t).
pub const ARTIX7: DeviceProfile = DeviceProfile {
    name: "Artix-7",
    aliases: &["artix7", "xc7a35t", "xc7a35ticpg236-1L", "a7"],
    vendor: Vendor::Xilinx,
    part: "xc7a35tcsg324-1",
    lut_inputs: 6,
    luts: 20_800,
    ffs: 41_600,
    brams: 50,
    bram_kbits: 36,
    dsps: 90,
    ios: 210,
    lut_delay_ns: 0.5,
    carry_delay_ns: 0.05,
    dsp_delay_ns: 2.8,
    bram_delay_ns: 2.1,
    clk_to_q_ns: 0.45,
    setup_ns: 0.1,
    routing_factor: 0.5,
    power_base_mw: 80.0,
    power_per_lut: 0.004,
    power_per_ff: 0.002,
    power_per_bram: 0.12,
    power_per_dsp: 0.25,
    power_per_io: 0.05,
    max_frequency_mhz: 450.0,
    temperature_factor: 1.04,
    voltage_exponent: 2.0,
    package: PackageKind::WireBondBga,
};

/// Kintex-7 (xc7k325t).
pub const KINTEX7: DeviceProfile = DeviceProfile {
    name: "Kintex-7",
    aliases: &["kintex7", "xc7k325t", "k7"],
    vendor: Vendor::Xilinx,
    part: "xc7k325tffg900-2",
    lut_inputs: 6,
    luts: 203_800,
    ffs: 407_600,
    brams: 445,
    bram_kbits: 36,
    dsps: 840,
    ios: 500,
    lut_delay_ns: 0.4,
    carry_delay_ns: 0.04,
    dsp_delay_ns: 2.3,
    bram_delay_ns: 1.8,
    clk_to_q_ns: 0.35,
    setup_ns: 0.08,
    routing_factor: 0.45,
    power_base_mw: 180.0,
    power_per_lut: 0.0035,
    power_per_ff: 0.0018,
    power_per_bram: 0.11,
    power_per_dsp: 0.22,
    power_per_io: 0.045,
    max_frequency_mhz: 640.0,
    temperature_factor: 1.04,
    voltage_exponent: 2.0,
    package: PackageKind::FlipChipBga,
};

/// Zynq-7020 programmable logic (xc7z020).
pub const ZYNQ7020: DeviceProfile = DeviceProfile {
    name: "Zynq-7020",
    aliases: &["zynq7020", "xc7z020", "zynq", "z7020"],
    vendor: Vendor::Xilinx,
    part: "xc7z020clg484-1",
    lut_inputs: 6,
    luts: 53_200,
    ffs: 106_400,
    brams: 140,
    bram_kbits: 36,
    dsps: 220,
    ios: 200,
    lut_delay_ns: 0.5,
    carry_delay_ns: 0.05,
    dsp_delay_ns: 2.8,
    bram_delay_ns: 2.1,
    clk_to_q_ns: 0.45,
    setup_ns: 0.1,
    routing_factor: 0.5,
    power_base_mw: 120.0,
    power_per_lut: 0.004,
    power_per_ff: 0.002,
    power_per_bram: 0.12,
    power_per_dsp: 0.25,
    power_per_io: 0.05,
    max_frequency_mhz: 450.0,
    temperature_factor: 1.04,
    voltage_exponent: 2.0,
    package: PackageKind::WireBondBga,
};

/// All Xilinx profiles in catalog order.
pub const DEVICES: &[DeviceProfile] = &[ARTIX7, KINTEX7, ZYNQ7020];
