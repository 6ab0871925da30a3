//! Resource counts and utilization against device capacity.

use hdlscope_arch::{DeviceProfile, ResourceUsage};
use serde::{Deserialize, Serialize};

/// Utilization in percent of device capacity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Utilization {
    /// LUT utilization.
    pub luts: f64,
    /// Flip-flop utilization.
    pub ffs: f64,
    /// Block RAM utilization.
    pub brams: f64,
    /// DSP utilization.
    pub dsps: f64,
    /// I/O utilization.
    pub ios: f64,
}

impl Utilization {
    /// The highest of the per-resource percentages.
    pub fn peak(&self) -> f64 {
        [self.luts, self.ffs, self.brams, self.dsps, self.ios]
            .into_iter()
            .fold(0.0, f64::max)
    }
}

/// Rounded resource counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEstimate {
    /// Device the estimate was computed for.
    pub device: String,
    /// Look-up tables.
    pub luts: u64,
    /// Flip-flops.
    pub ffs: u64,
    /// Block RAM tiles.
    pub brams: u64,
    /// DSP blocks.
    pub dsps: u64,
    /// I/O pins.
    pub ios: u64,
    /// Percent of the device's capacity.
    pub utilization: Utilization,
}

impl ResourceEstimate {
    /// Rounds fractional usage up and computes utilization.
    pub(crate) fn from_usage(device: &DeviceProfile, usage: ResourceUsage, ios: u64) -> Self {
        let luts = round_up(usage.luts);
        let ffs = round_up(usage.ffs);
        let brams = round_up(usage.brams);
        let dsps = round_up(usage.dsps);
        ResourceEstimate {
            device: device.name.to_string(),
            luts,
            ffs,
            brams,
            dsps,
            ios,
            utilization: Utilization {
                luts: percent(luts, device.luts),
                ffs: percent(ffs, device.ffs),
                brams: percent(brams, device.brams),
                dsps: percent(dsps, device.dsps),
                ios: percent(ios, device.ios),
            },
        }
    }

    /// Returns true if no resource exceeds the device capacity.
    pub fn fits(&self) -> bool {
        self.utilization.peak() <= 100.0
    }
}

/// Ceiling that ignores floating-point noise just above an integer.
pub(crate) fn round_up(x: f64) -> u64 {
    (x - 1e-9).ceil().max(0.0) as u64
}

fn percent(used: u64, available: u32) -> f64 {
    used as f64 * 100.0 / f64::from(available.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_arch::xilinx;

    #[test]
    fn rounding_tolerates_float_noise() {
        assert_eq!(round_up(2.2 * 10.0), 22);
        assert_eq!(round_up(19.2), 20);
        assert_eq!(round_up(0.0), 0);
    }

    #[test]
    fn utilization_against_capacity() {
        let usage = ResourceUsage {
            luts: 2_080.0,
            ffs: 416.0,
            brams: 0.0,
            dsps: 9.0,
        };
        let r = ResourceEstimate::from_usage(&xilinx::ARTIX7, usage, 21);
        assert!((r.utilization.luts - 10.0).abs() < 1e-9);
        assert!((r.utilization.ffs - 1.0).abs() < 1e-9);
        assert!((r.utilization.dsps - 10.0).abs() < 1e-9);
        assert!((r.utilization.ios - 10.0).abs() < 1e-9);
        assert!((r.utilization.peak() - 10.0).abs() < 1e-9);
        assert!(r.fits());
    }

    #[test]
    fn overflow_does_not_fit() {
        let usage = ResourceUsage::logic(30_000.0, 0.0);
        assert!(!ResourceEstimate::from_usage(&xilinx::ARTIX7, usage, 0).fits());
    }
}
