//! Critical-path delay and achievable frequency.

use crate::config::OperatingPoint;
use hdlscope_arch::DeviceProfile;
use serde::{Deserialize, Serialize};

/// Timing of one component or design at an operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEstimate {
    /// Device the estimate was computed for.
    pub device: String,
    /// Unscaled logic delay in ns.
    pub logic_delay_ns: f64,
    /// Unscaled routing delay in ns.
    pub routing_delay_ns: f64,
    /// Critical path after temperature and speed-grade scaling, in ns.
    pub total_delay_ns: f64,
    /// Achievable clock frequency, capped at the device maximum.
    pub max_frequency_mhz: f64,
    /// Clock period the slack is measured against (10 ns unless configured).
    pub target_period_ns: f64,
    /// `target_period_ns - total_delay_ns`.
    pub setup_slack_ns: f64,
    /// LUT levels on the critical path.
    pub logic_levels: u32,
    /// Combined temperature and speed-grade multiplier.
    pub derating: f64,
}

impl TimingEstimate {
    /// Returns true if the critical path fits in the target period.
    pub fn meets_target(&self) -> bool {
        self.setup_slack_ns >= 0.0
    }
}

/// Combined temperature and speed-grade delay multiplier.
pub(crate) fn derating(device: &DeviceProfile, point: &OperatingPoint) -> f64 {
    device.temperature_scale(point.temperature_c) * point.speed_grade.factor()
}

/// Builds a timing record from an unscaled logic delay.
///
/// `register_ns` is added outside the routing model (clock-to-Q plus setup
/// for register-to-register paths, zero for bare components).
pub(crate) fn timing(
    device: &DeviceProfile,
    point: &OperatingPoint,
    logic_delay_ns: f64,
    register_ns: f64,
    logic_levels: u32,
) -> TimingEstimate {
    let routing_delay_ns = logic_delay_ns * device.routing_factor * f64::from(point.fanout).sqrt();
    let derating = derating(device, point);
    let total_delay_ns = (logic_delay_ns + routing_delay_ns + register_ns) * derating;
    let max_frequency_mhz = (1_000.0 / total_delay_ns).min(device.max_frequency_mhz);
    TimingEstimate {
        device: device.name.to_string(),
        logic_delay_ns,
        routing_delay_ns,
        total_delay_ns,
        max_frequency_mhz,
        target_period_ns: point.target_period_ns,
        setup_slack_ns: point.target_period_ns - total_delay_ns,
        logic_levels,
        derating,
    }
}

/// LUT levels implied by a logic delay: `max(1, ceil(logic / lut_delay))`.
pub(crate) fn levels_for(device: &DeviceProfile, logic_delay_ns: f64) -> u32 {
    ((logic_delay_ns / device.lut_delay_ns - 1e-9).ceil() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_arch::{xilinx, SpeedGrade};

    #[test]
    fn routing_scales_with_sqrt_fanout() {
        let point = OperatingPoint::default();
        let t = timing(&xilinx::ARTIX7, &point, 1.0, 0.0, 2);
        assert!((t.routing_delay_ns - 0.5 * 2.0).abs() < 1e-12);
        assert!((t.total_delay_ns - 2.0).abs() < 1e-12);
        assert!((t.max_frequency_mhz - 450.0).abs() < 1e-9);
        assert!((t.setup_slack_ns - 8.0).abs() < 1e-12);
        assert!(t.meets_target());
    }

    #[test]
    fn frequency_below_cap_for_long_paths() {
        let t = timing(&xilinx::ARTIX7, &OperatingPoint::default(), 6.0, 0.0, 12);
        assert!((t.max_frequency_mhz - 1_000.0 / 12.0).abs() < 1e-9);
        assert!(!t.meets_target());
    }

    #[test]
    fn hot_slow_silicon_is_slower() {
        let cool = OperatingPoint {
            speed_grade: SpeedGrade::Fastest,
            ..OperatingPoint::default()
        };
        let hot = OperatingPoint {
            temperature_c: 85.0,
            ..OperatingPoint::default()
        };
        let a = timing(&xilinx::ARTIX7, &cool, 3.0, 0.0, 6);
        let b = timing(&xilinx::ARTIX7, &hot, 3.0, 0.0, 6);
        assert!(a.total_delay_ns < b.total_delay_ns);
        assert!((a.derating - 0.75).abs() < 1e-12);
    }

    #[test]
    fn levels() {
        assert_eq!(levels_for(&xilinx::ARTIX7, 0.1), 1);
        assert_eq!(levels_for(&xilinx::ARTIX7, 1.0), 2);
        assert_eq!(levels_for(&xilinx::ARTIX7, 1.3), 3);
    }
}
