//! Lattice iCE40 device profiles.

use crate::device::{DeviceProfile, Vendor};
use crate::types::PackageKind;

/// iCE40 UltraPlus UP5K: 4-input LUTs, 4Kb EBRs, eight 16x16 MAC blocks.
pub const ICE40_UP5K: DeviceProfile = DeviceProfile {
    name: "iCE40-UP5K",
    aliases: &["ice40up5k", "up5k", "ice40"],
    vendor: Vendor::Lattice,
    part: "iCE40UP5K-SG48",
    lut_inputs: 4,
    luts: 5_280,
    ffs: 5_280,
    brams: 30,
    bram_kbits: 4,
    dsps: 8,
    ios: 39,
    lut_delay_ns: 0.9,
    carry_delay_ns: 0.12,
    dsp_delay_ns: 6.0,
    bram_delay_ns: 3.5,
    clk_to_q_ns: 0.8,
    setup_ns: 0.2,
    routing_factor: 0.7,
    power_base_mw: 0.1,
    power_per_lut: 0.0012,
    power_per_ff: 0.0006,
    power_per_bram: 0.03,
    power_per_dsp: 0.08,
    power_per_io: 0.02,
    max_frequency_mhz: 150.0,
    temperature_factor: 1.06,
    voltage_exponent: 2.0,
    package: PackageKind::Qfn,
};

/// All Lattice profiles in catalog order.
pub const DEVICES: &[DeviceProfile] = &[ICE40_UP5K];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up5k_is_low_power() {
        assert!(ICE40_UP5K.power_base_mw < 1.0);
        assert_eq!(ICE40_UP5K.package, PackageKind::Qfn);
    }
}
