//! Static and dynamic power.

use crate::config::OperatingPoint;
use crate::resource::ResourceEstimate;
use hdlscope_arch::DeviceProfile;
use serde::{Deserialize, Serialize};

/// Clock-tree power per MHz, in mW.
const CLOCK_MW_PER_MHZ: f64 = 0.1;

/// Power breakdown in mW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerEstimate {
    /// Device the estimate was computed for.
    pub device: String,
    /// Leakage, scaled by temperature and voltage.
    pub static_mw: f64,
    /// LUT switching power.
    pub logic_mw: f64,
    /// Flip-flop switching power.
    pub register_mw: f64,
    /// Block RAM and DSP switching power.
    pub block_mw: f64,
    /// Clock tree power.
    pub clock_mw: f64,
    /// I/O switching power.
    pub io_mw: f64,
    /// Sum of the dynamic terms.
    pub dynamic_mw: f64,
    /// Static plus dynamic.
    pub total_mw: f64,
}

impl PowerEstimate {
    /// Total power in watts.
    pub fn total_w(&self) -> f64 {
        self.total_mw / 1_000.0
    }
}

pub(crate) fn power(
    device: &DeviceProfile,
    point: &OperatingPoint,
    resources: &ResourceEstimate,
) -> PowerEstimate {
    let f = point.frequency_mhz;
    let activity = f * point.toggle_rate;
    let static_mw = device.power_base_mw
        * device.temperature_scale(point.temperature_c)
        * point.voltage_v.powf(device.voltage_exponent);
    let logic_mw = resources.luts as f64 * device.power_per_lut * activity;
    let register_mw = resources.ffs as f64 * device.power_per_ff * activity;
    let block_mw = (resources.brams as f64 * device.power_per_bram
        + resources.dsps as f64 * device.power_per_dsp)
        * activity;
    let clock_mw = f * CLOCK_MW_PER_MHZ;
    let io_mw = resources.ios as f64 * device.power_per_io * activity;
    let dynamic_mw = logic_mw + register_mw + block_mw + clock_mw + io_mw;
    PowerEstimate {
        device: device.name.to_string(),
        static_mw,
        logic_mw,
        register_mw,
        block_mw,
        clock_mw,
        io_mw,
        dynamic_mw,
        total_mw: static_mw + dynamic_mw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Utilization;
    use hdlscope_arch::xilinx;

    fn resources(luts: u64, ffs: u64, ios: u64) -> ResourceEstimate {
        ResourceEstimate {
            device: "Artix-7".into(),
            luts,
            ffs,
            brams: 0,
            dsps: 0,
            ios,
            utilization: Utilization::default(),
        }
    }

    #[test]
    fn idle_design_is_static_plus_clock() {
        let p = power(&xilinx::ARTIX7, &OperatingPoint::default(), &resources(0, 0, 0));
        assert!((p.static_mw - 80.0).abs() < 1e-9);
        assert!((p.clock_mw - 10.0).abs() < 1e-9);
        assert!((p.total_mw - 90.0).abs() < 1e-9);
    }

    #[test]
    fn dynamic_terms() {
        let p = power(&xilinx::ARTIX7, &OperatingPoint::default(), &resources(1_000, 500, 10));
        // 100 MHz at 25% toggle: 25 MHz of activity.
        assert!((p.logic_mw - 1_000.0 * 0.004 * 25.0).abs() < 1e-9);
        assert!((p.register_mw - 500.0 * 0.002 * 25.0).abs() < 1e-9);
        assert!((p.io_mw - 10.0 * 0.05 * 25.0).abs() < 1e-9);
        assert!((p.total_w() - p.total_mw / 1_000.0).abs() < 1e-12);
    }

    #[test]
    fn static_scales_with_voltage_squared() {
        let low = OperatingPoint {
            voltage_v: 0.9,
            ..OperatingPoint::default()
        };
        let p = power(&xilinx::ARTIX7, &low, &resources(0, 0, 0));
        assert!((p.static_mw - 80.0 * 0.81).abs() < 1e-9);
    }
}
