//! The estimation engine: catalog lookup, validation and the four estimators.

use crate::config::{EstimateConfig, OperatingPoint};
use crate::error::EstimateError;
use crate::intent::DesignIntent;
use crate::metrics::DesignMetrics;
use crate::power::{power, PowerEstimate};
use crate::resource::ResourceEstimate;
use crate::thermal::{thermal, ThermalEstimate};
use crate::timing::{levels_for, timing, TimingEstimate};
use hdlscope_arch::{
    ArchitectureCatalog, ArchitectureProfile, ComponentKind, DeviceCatalog, DeviceProfile,
    ResourceUsage,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Multipliers at least this wide map onto DSP blocks.
const DSP_MIN_WIDTH: u32 = 8;

/// Operand width one DSP block covers.
const DSP_OPERAND_BITS: f64 = 18.0;

/// Fraction of LUTs left once a multiplier maps onto DSP blocks.
const DSP_LUT_FRACTION: f64 = 0.3;

/// All four estimates for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimates {
    /// Resource counts.
    pub resources: ResourceEstimate,
    /// Critical path.
    pub timing: TimingEstimate,
    /// Power breakdown.
    pub power: PowerEstimate,
    /// Junction temperature.
    pub thermal: ThermalEstimate,
}

/// A validated request: the device and optional architecture it resolves to.
struct Resolved<'a> {
    device: &'a DeviceProfile,
    profile: Option<&'a ArchitectureProfile>,
}

/// Maps component requests and design metrics onto estimates.
///
/// Holds only shared references to immutable catalogs, so one engine can be
/// used from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct EstimationEngine<'a> {
    devices: &'a DeviceCatalog,
    architectures: &'a ArchitectureCatalog,
}

impl<'a> EstimationEngine<'a> {
    /// Creates an engine over the given catalogs.
    pub fn new(devices: &'a DeviceCatalog, architectures: &'a ArchitectureCatalog) -> Self {
        Self {
            devices,
            architectures,
        }
    }

    /// The device catalog.
    pub fn devices(&self) -> &'a DeviceCatalog {
        self.devices
    }

    /// The architecture catalog.
    pub fn architectures(&self) -> &'a ArchitectureCatalog {
        self.architectures
    }

    /// Looks up a device, failing with [`EstimateError::UnknownDevice`].
    pub fn device(&self, name: &str) -> Result<&'a DeviceProfile, EstimateError> {
        self.devices
            .get(name)
            .ok_or_else(|| EstimateError::UnknownDevice(name.to_string()))
    }

    fn resolve(&self, config: &EstimateConfig) -> Result<Resolved<'a>, EstimateError> {
        let device = self.device(&config.point.device)?;
        let profile = match config.architecture {
            None => None,
            Some(arch) => {
                let profile = self.architectures.get(config.component, arch).ok_or_else(|| {
                    EstimateError::UnknownArchitecture {
                        component: config.component,
                        architecture: arch.name().to_string(),
                    }
                })?;
                Some(profile)
            }
        };
        config.validate()?;
        debug!(
            "estimating {} {} width={} depth={:?} x{} on {} at {} MHz",
            config.component,
            config.architecture.map_or("generic", |a| a.name()),
            config.width,
            config.depth,
            config.instances,
            device.name,
            config.point.frequency_mhz
        );
        Ok(Resolved { device, profile })
    }

    fn timing_for(&self, r: &Resolved<'a>, config: &EstimateConfig) -> TimingEstimate {
        let logic_delay = match r.profile {
            Some(profile) => profile.delay_ns(config.dims()),
            None => {
                let levels = f64::from(config.width.max(2)).log2().ceil();
                levels * r.device.lut_delay_ns
            }
        };
        timing(
            r.device,
            &config.point,
            logic_delay,
            0.0,
            levels_for(r.device, logic_delay),
        )
    }

    fn resources_for(&self, r: &Resolved<'a>, config: &EstimateConfig) -> ResourceEstimate {
        let w = f64::from(config.width);
        let mut usage = r
            .profile
            .map(|p| p.usage(config.dims()))
            .unwrap_or_else(|| ResourceUsage::logic(2.0 * w, w));
        if config.component == ComponentKind::Multiplier && config.width >= DSP_MIN_WIDTH {
            usage.dsps += (w / DSP_OPERAND_BITS).ceil();
            usage.luts *= DSP_LUT_FRACTION;
        }
        ResourceEstimate::from_usage(r.device, usage * f64::from(config.instances), 0)
    }

    /// Estimates the component's critical path.
    pub fn estimate_timing(
        &self,
        config: &EstimateConfig,
    ) -> Result<TimingEstimate, EstimateError> {
        let r = self.resolve(config)?;
        Ok(self.timing_for(&r, config))
    }

    /// Estimates the component's resource usage.
    pub fn estimate_resources(
        &self,
        config: &EstimateConfig,
    ) -> Result<ResourceEstimate, EstimateError> {
        let r = self.resolve(config)?;
        Ok(self.resources_for(&r, config))
    }

    /// Estimates the component's power.
    pub fn estimate_power(&self, config: &EstimateConfig) -> Result<PowerEstimate, EstimateError> {
        let r = self.resolve(config)?;
        let resources = self.resources_for(&r, config);
        Ok(power(r.device, &config.point, &resources))
    }

    /// Estimates the junction temperature the component's power produces.
    pub fn estimate_thermal(
        &self,
        config: &EstimateConfig,
    ) -> Result<ThermalEstimate, EstimateError> {
        let r = self.resolve(config)?;
        let resources = self.resources_for(&r, config);
        let power = power(r.device, &config.point, &resources);
        Ok(thermal(r.device, &config.point, &power))
    }

    /// Runs all four estimators for one component.
    pub fn estimate_all(&self, config: &EstimateConfig) -> Result<Estimates, EstimateError> {
        let r = self.resolve(config)?;
        let resources = self.resources_for(&r, config);
        let timing = self.timing_for(&r, config);
        let power = power(r.device, &config.point, &resources);
        let thermal = thermal(r.device, &config.point, &power);
        Ok(Estimates {
            resources,
            timing,
            power,
            thermal,
        })
    }

    /// Converts an intent into a request, defaulting the architecture to
    /// the first one registered for the component kind.
    pub fn config_for_intent(
        &self,
        intent: &DesignIntent,
        defaults: &OperatingPoint,
    ) -> Result<EstimateConfig, EstimateError> {
        let mut config = EstimateConfig::from_intent(intent, defaults)?;
        if config.architecture.is_none() {
            config.architecture = self
                .architectures
                .default_for(config.component)
                .map(|p| p.architecture);
        }
        Ok(config)
    }

    /// Estimates a whole extracted design at an operating point.
    ///
    /// Registers, adders and expression complexity map onto LUTs and
    /// flip-flops, memories onto block RAM tiles, and multipliers onto DSP
    /// blocks the same way component multipliers do. The critical path is a
    /// register-to-register path through `logic_levels` LUTs plus the
    /// slowest hard block the design uses.
    pub fn estimate_design(
        &self,
        metrics: &DesignMetrics,
        point: &OperatingPoint,
    ) -> Result<Estimates, EstimateError> {
        let device = self.device(&point.device)?;
        point.validate()?;
        debug!(
            "estimating design ({} modules) on {} at {} MHz",
            metrics.modules, device.name, point.frequency_mhz
        );

        let w = f64::from(metrics.datapath_width);
        let registers = metrics.register_bits as f64;
        let multiplier = if metrics.datapath_width >= DSP_MIN_WIDTH {
            ResourceUsage {
                luts: 2.0 * w * DSP_LUT_FRACTION,
                dsps: (w / DSP_OPERAND_BITS).ceil(),
                ..ResourceUsage::default()
            }
        } else {
            ResourceUsage::logic(2.0 * w, 0.0)
        };
        let usage = ResourceUsage {
            luts: registers + f64::from(metrics.adders) * w + metrics.total_complexity as f64,
            ffs: registers,
            brams: (metrics.memory_bits as f64 / device.bram_bits() as f64).ceil(),
            dsps: 0.0,
        } + multiplier * f64::from(metrics.multipliers);
        let resources = ResourceEstimate::from_usage(device, usage, metrics.io_bits);

        let mut hard_block: f64 = 0.0;
        if metrics.multipliers > 0 {
            hard_block = hard_block.max(device.dsp_delay_ns);
        }
        if metrics.memory_bits > 0 {
            hard_block = hard_block.max(device.bram_delay_ns);
        }
        if metrics.adders > 0 {
            hard_block = hard_block.max(device.carry_delay_ns * w);
        }
        let logic_delay = f64::from(metrics.logic_levels) * device.lut_delay_ns + hard_block;
        let timing = timing(
            device,
            point,
            logic_delay,
            device.clk_to_q_ns + device.setup_ns,
            metrics.logic_levels,
        );

        let power = power(device, point, &resources);
        let thermal = thermal(device, point, &power);
        Ok(Estimates {
            resources,
            timing,
            power,
            thermal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentValue;
    use hdlscope_arch::Architecture;

    fn catalogs() -> (DeviceCatalog, ArchitectureCatalog) {
        (DeviceCatalog::builtin(), ArchitectureCatalog::builtin())
    }

    #[test]
    fn ripple_carry_timing_grows_with_width() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let delay = |w| {
            let config = EstimateConfig::new(ComponentKind::Adder, w)
                .with_architecture(Architecture::RippleCarry);
            engine.estimate_timing(&config).unwrap().total_delay_ns
        };
        assert!(delay(8) < delay(16));
        assert!(delay(16) < delay(32));
    }

    #[test]
    fn generic_timing_uses_lut_levels() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let t = engine
            .estimate_timing(&EstimateConfig::new(ComponentKind::Adder, 16))
            .unwrap();
        assert!((t.logic_delay_ns - 4.0 * 0.5).abs() < 1e-12);
        assert_eq!(t.logic_levels, 4);
        assert_eq!(t.target_period_ns, 10.0);
    }

    #[test]
    fn wide_multiplier_uses_dsps() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let mult = engine
            .estimate_resources(&EstimateConfig::new(ComponentKind::Multiplier, 32))
            .unwrap();
        let generic = engine
            .estimate_resources(&EstimateConfig::new(ComponentKind::Adder, 32))
            .unwrap();
        assert!(mult.dsps >= 1);
        assert!(mult.luts < generic.luts);
        assert_eq!(generic.luts, 64);
        assert_eq!(mult.dsps, 2);

        let narrow = engine
            .estimate_resources(&EstimateConfig::new(ComponentKind::Multiplier, 4))
            .unwrap();
        assert_eq!(narrow.dsps, 0);
    }

    #[test]
    fn architecture_multiplier_also_maps_to_dsps() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let config = EstimateConfig::new(ComponentKind::Multiplier, 32)
            .with_architecture(Architecture::Array);
        let r = engine.estimate_resources(&config).unwrap();
        assert_eq!(r.dsps, 2);
        assert_eq!(r.luts, 308);
    }

    #[test]
    fn unknown_device_fails_everywhere() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let config = EstimateConfig::new(ComponentKind::Adder, 8).with_device("Nonexistent-9000");
        let expected = EstimateError::UnknownDevice("Nonexistent-9000".into());
        assert_eq!(engine.estimate_timing(&config), Err(expected.clone()));
        assert_eq!(engine.estimate_resources(&config), Err(expected.clone()));
        assert_eq!(engine.estimate_power(&config), Err(expected.clone()));
        assert_eq!(engine.estimate_thermal(&config), Err(expected.clone()));
        assert_eq!(engine.estimate_all(&config), Err(expected));
    }

    #[test]
    fn unregistered_pair_fails() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let config =
            EstimateConfig::new(ComponentKind::Adder, 8).with_architecture(Architecture::Booth);
        assert_eq!(
            engine.estimate_timing(&config),
            Err(EstimateError::UnknownArchitecture {
                component: ComponentKind::Adder,
                architecture: "booth".into(),
            })
        );
    }

    #[test]
    fn invalid_parameters_fail() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let fifo = EstimateConfig::new(ComponentKind::Fifo, 8);
        assert_eq!(
            engine.estimate_resources(&fifo),
            Err(EstimateError::MissingParameter("depth"))
        );
        let mut hot = EstimateConfig::new(ComponentKind::Adder, 8);
        hot.point.toggle_rate = 2.0;
        assert!(matches!(
            engine.estimate_power(&hot),
            Err(EstimateError::InvalidParameter { name: "toggle_rate", .. })
        ));
    }

    #[test]
    fn instances_scale_linearly() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let one = EstimateConfig::new(ComponentKind::Counter, 16)
            .with_architecture(Architecture::Binary);
        let four = one.clone().with_instances(4);
        let a = engine.estimate_resources(&one).unwrap();
        let b = engine.estimate_resources(&four).unwrap();
        assert_eq!(b.luts, 4 * a.luts);
        assert_eq!(b.ffs, 4 * a.ffs);
    }

    #[test]
    fn estimates_are_deterministic() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let config = EstimateConfig::new(ComponentKind::Fifo, 32)
            .with_depth(1024)
            .with_architecture(Architecture::BlockRam);
        assert_eq!(engine.estimate_all(&config), engine.estimate_all(&config));
    }

    #[test]
    fn thermal_follows_power() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let config = EstimateConfig::new(ComponentKind::Adder, 32);
        let all = engine.estimate_all(&config).unwrap();
        assert_eq!(engine.estimate_power(&config).unwrap(), all.power);
        assert_eq!(engine.estimate_thermal(&config).unwrap(), all.thermal);
        assert!((all.thermal.power_w - all.power.total_w()).abs() < 1e-12);
    }

    #[test]
    fn intent_defaults_to_first_architecture() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let intent = DesignIntent::new("adder").with_parameter("width", IntentValue::Integer(16));
        let config = engine
            .config_for_intent(&intent, &OperatingPoint::default())
            .unwrap();
        assert_eq!(config.architecture, Some(Architecture::RippleCarry));
    }

    #[test]
    fn design_estimate_for_mac() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let metrics = DesignMetrics {
            modules: 1,
            io_bits: 33,
            register_bits: 16,
            memory_bits: 512,
            multipliers: 1,
            adders: 1,
            max_complexity: 1,
            total_complexity: 2,
            logic_levels: 1,
            datapath_width: 16,
        };
        let e = engine
            .estimate_design(&metrics, &OperatingPoint::default())
            .unwrap();
        assert_eq!(e.resources.ffs, 16);
        assert_eq!(e.resources.brams, 1);
        assert_eq!(e.resources.dsps, 1);
        assert_eq!(e.resources.ios, 33);
        // 16 registers + 16 adder LUTs + 2 complexity + 9.6 multiplier LUTs.
        assert_eq!(e.resources.luts, 44);
        assert_eq!(e.timing.logic_levels, 1);
        assert!(e.timing.logic_delay_ns > devices.get("Artix-7").unwrap().dsp_delay_ns);
    }

    #[test]
    fn design_estimate_unknown_device() {
        let (devices, archs) = catalogs();
        let engine = EstimationEngine::new(&devices, &archs);
        let point = OperatingPoint {
            device: "Nonexistent-9000".into(),
            ..OperatingPoint::default()
        };
        assert_eq!(
            engine.estimate_design(&DesignMetrics::default(), &point),
            Err(EstimateError::UnknownDevice("Nonexistent-9000".into()))
        );
    }
}
