//! Candidate generation and ranking.

use crate::candidate::{Figures, Optimization, ParameterDelta};
use hdlscope_config::AdvisorSection;
use hdlscope_estimate::{
    DesignMetrics, EstimateConfig, EstimateError, Estimates, EstimationEngine, OperatingPoint,
};
use log::debug;

/// Pipelining is proposed above this many logic levels.
const PIPELINE_MIN_LEVELS: u32 = 4;
/// Logic levels each pipeline stage absorbs.
const LEVELS_PER_STAGE: u32 = 3;
/// Frequency gain assumed for a pipelined path.
const PIPELINE_SPEEDUP: f64 = 2.5;
/// Clock scale of the DVFS candidate.
const DVFS_FREQUENCY_SCALE: f64 = 0.8;
/// Supply scale of the DVFS candidate.
const DVFS_VOLTAGE_SCALE: f64 = 0.9;

/// Proposes and ranks alternatives to a baseline estimate.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationAdvisor<'a> {
    engine: EstimationEngine<'a>,
    max_results: usize,
    include_device_alternatives: bool,
}

impl<'a> OptimizationAdvisor<'a> {
    /// An advisor keeping the top 5 candidates, without device migration.
    pub fn new(engine: EstimationEngine<'a>) -> Self {
        let defaults = AdvisorSection::default();
        Self {
            engine,
            max_results: defaults.max_results,
            include_device_alternatives: defaults.include_device_alternatives,
        }
    }

    /// Applies the `[advisor]` config section.
    pub fn with_settings(mut self, settings: &AdvisorSection) -> Self {
        self.max_results = settings.max_results;
        self.include_device_alternatives = settings.include_device_alternatives;
        self
    }

    /// Sets how many candidates are kept.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Enables or disables device migration candidates.
    pub fn with_device_alternatives(mut self, enabled: bool) -> Self {
        self.include_device_alternatives = enabled;
        self
    }

    /// Ranks alternatives for one component.
    ///
    /// Candidates are every other registered architecture for the component
    /// (registration order), pipelining when the baseline has more than four
    /// logic levels, a voltage/frequency scaling point and, when enabled,
    /// every other device. Fails if the baseline itself cannot be estimated.
    pub fn suggest_alternatives(
        &self,
        baseline: &EstimateConfig,
    ) -> Result<Vec<Optimization>, EstimateError> {
        let base = self.engine.estimate_all(baseline)?;
        let base_figures = Figures::of(&base);
        let mut candidates = Vec::new();

        for profile in self.engine.architectures().for_component(baseline.component) {
            if Some(profile.architecture) == baseline.architecture {
                continue;
            }
            let config = baseline.clone().with_architecture(profile.architecture);
            let estimates = self.engine.estimate_all(&config)?;
            candidates.push(Optimization::new(
                format!("switch to {} ({})", profile.architecture, profile.description),
                ParameterDelta::SwitchArchitecture {
                    from: baseline.architecture,
                    to: profile.architecture,
                },
                base_figures,
                Figures::of(&estimates),
            ));
        }

        candidates.extend(pipelining(base.timing.logic_levels, base_figures));

        let dvfs_point = dvfs_point(&baseline.point);
        let dvfs = self
            .engine
            .estimate_all(&baseline.clone().with_point(dvfs_point.clone()))?;
        candidates.push(dvfs_candidate(&dvfs_point, base_figures, &dvfs));

        if self.include_device_alternatives {
            let current = self.engine.device(&baseline.point.device)?;
            for device in self.engine.devices().iter() {
                if device.name == current.name {
                    continue;
                }
                let config = baseline.clone().with_device(device.name);
                let estimates = self.engine.estimate_all(&config)?;
                candidates.push(Optimization::new(
                    format!("migrate to {} ({})", device.name, device.vendor),
                    ParameterDelta::MigrateDevice {
                        from: current.name.to_string(),
                        to: device.name.to_string(),
                    },
                    base_figures,
                    Figures::of(&estimates),
                ));
            }
        }

        Ok(self.rank(candidates))
    }

    /// Ranks pipelining and voltage/frequency scaling for a whole design.
    pub fn suggest_design_alternatives(
        &self,
        metrics: &DesignMetrics,
        point: &OperatingPoint,
    ) -> Result<Vec<Optimization>, EstimateError> {
        let base = self.engine.estimate_design(metrics, point)?;
        let base_figures = Figures::of(&base);
        let mut candidates: Vec<Optimization> =
            pipelining(base.timing.logic_levels, base_figures).into_iter().collect();

        let dvfs_point = dvfs_point(point);
        let dvfs = self.engine.estimate_design(metrics, &dvfs_point)?;
        candidates.push(dvfs_candidate(&dvfs_point, base_figures, &dvfs));

        Ok(self.rank(candidates))
    }

    /// Stable sort, so equal scores keep their candidate order.
    fn rank(&self, mut candidates: Vec<Optimization>) -> Vec<Optimization> {
        debug!("ranking {} optimization candidates", candidates.len());
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.max_results);
        candidates
    }
}

fn pipelining(levels: u32, base_figures: Figures) -> Option<Optimization> {
    if levels <= PIPELINE_MIN_LEVELS {
        return None;
    }
    let stages = levels.div_ceil(LEVELS_PER_STAGE);
    let candidate = Figures {
        frequency_mhz: base_figures.frequency_mhz * PIPELINE_SPEEDUP,
        luts: base_figures.luts.saturating_add(u64::from(stages - 1)),
        power_mw: base_figures.power_mw,
    };
    Some(Optimization::new(
        format!("insert {stages} pipeline stages to split {levels} logic levels"),
        ParameterDelta::AddPipelineStages { stages },
        base_figures,
        candidate,
    ))
}

fn dvfs_point(point: &OperatingPoint) -> OperatingPoint {
    OperatingPoint {
        frequency_mhz: point.frequency_mhz * DVFS_FREQUENCY_SCALE,
        voltage_v: point.voltage_v * DVFS_VOLTAGE_SCALE,
        ..point.clone()
    }
}

/// The DVFS candidate runs the clock 20% slower, so its frequency figure is
/// the baseline's scaled by the same factor.
fn dvfs_candidate(point: &OperatingPoint, base: Figures, estimates: &Estimates) -> Optimization {
    let candidate = Figures {
        frequency_mhz: base.frequency_mhz * DVFS_FREQUENCY_SCALE,
        ..Figures::of(estimates)
    };
    Optimization::new(
        format!(
            "scale to {:.1} MHz at {:.2} V",
            point.frequency_mhz, point.voltage_v
        ),
        ParameterDelta::ScaleVoltageFrequency {
            frequency_mhz: point.frequency_mhz,
            voltage_v: point.voltage_v,
        },
        base,
        candidate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_arch::{Architecture, ArchitectureCatalog, ComponentKind, DeviceCatalog};

    fn catalogs() -> (DeviceCatalog, ArchitectureCatalog) {
        (DeviceCatalog::builtin(), ArchitectureCatalog::builtin())
    }

    #[test]
    fn adder_alternatives_exclude_baseline() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs));
        let baseline = EstimateConfig::new(ComponentKind::Adder, 32)
            .with_architecture(Architecture::RippleCarry);
        let ranked = advisor.suggest_alternatives(&baseline).unwrap();
        assert!(!ranked.is_empty() && ranked.len() <= 5);
        assert!(ranked.iter().all(|o| !matches!(
            o.delta,
            ParameterDelta::SwitchArchitecture {
                to: Architecture::RippleCarry,
                ..
            }
        )));
        assert!(ranked
            .iter()
            .any(|o| matches!(o.delta, ParameterDelta::ScaleVoltageFrequency { .. })));
    }

    #[test]
    fn sorted_by_descending_score() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs))
            .with_device_alternatives(true)
            .with_max_results(50);
        let baseline = EstimateConfig::new(ComponentKind::Multiplier, 16)
            .with_architecture(Architecture::Array);
        let ranked = advisor.suggest_alternatives(&baseline).unwrap();
        // 2 other architectures, pipelining, DVFS, 5 other devices.
        assert_eq!(ranked.len(), 9);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn equal_scores_keep_candidate_order() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs));
        let base = Figures {
            frequency_mhz: 100.0,
            luts: 10,
            power_mw: 5.0,
        };
        let faster = Figures {
            frequency_mhz: 200.0,
            ..base
        };
        let candidate = |name: &str, figures| {
            Optimization::new(
                name.to_string(),
                ParameterDelta::AddPipelineStages { stages: 2 },
                base,
                figures,
            )
        };
        let ranked = advisor.rank(vec![
            candidate("first", base),
            candidate("second", base),
            candidate("best", faster),
            candidate("third", base),
        ]);
        let names: Vec<&str> = ranked.iter().map(|o| o.description.as_str()).collect();
        assert_eq!(names, vec!["best", "first", "second", "third"]);
    }

    #[test]
    fn pipelining_saturates_lut_count() {
        let base = Figures {
            frequency_mhz: 50.0,
            luts: u64::MAX,
            power_mw: 5.0,
        };
        let pipe = pipelining(12, base).unwrap();
        assert_eq!(pipe.luts, u64::MAX);
        assert_eq!(pipe.lut_delta, 0);
        assert!(pipelining(PIPELINE_MIN_LEVELS, base).is_none());
    }

    #[test]
    fn truncates_to_max_results() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs))
            .with_device_alternatives(true)
            .with_max_results(3);
        let baseline = EstimateConfig::new(ComponentKind::Adder, 8);
        assert_eq!(advisor.suggest_alternatives(&baseline).unwrap().len(), 3);
    }

    #[test]
    fn pipelining_only_for_deep_logic() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs))
            .with_max_results(50);
        // Array multiplier at 16 bits: 4.2 ns logic, 9 levels.
        let deep = EstimateConfig::new(ComponentKind::Multiplier, 16)
            .with_architecture(Architecture::Array);
        let ranked = advisor.suggest_alternatives(&deep).unwrap();
        let pipe = ranked
            .iter()
            .find(|o| matches!(o.delta, ParameterDelta::AddPipelineStages { .. }))
            .unwrap();
        assert_eq!(pipe.delta, ParameterDelta::AddPipelineStages { stages: 3 });
        assert_eq!(pipe.lut_delta, 2);

        let shallow = EstimateConfig::new(ComponentKind::Counter, 4)
            .with_architecture(Architecture::Johnson);
        let ranked = advisor.suggest_alternatives(&shallow).unwrap();
        assert!(!ranked
            .iter()
            .any(|o| matches!(o.delta, ParameterDelta::AddPipelineStages { .. })));
    }

    #[test]
    fn dvfs_saves_power() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs))
            .with_max_results(50);
        let ranked = advisor
            .suggest_alternatives(&EstimateConfig::new(ComponentKind::Adder, 16))
            .unwrap();
        let dvfs = ranked
            .iter()
            .find(|o| matches!(o.delta, ParameterDelta::ScaleVoltageFrequency { .. }))
            .unwrap();
        assert!(dvfs.power_delta_mw < 0.0);
        assert!(dvfs.frequency_delta_mhz < 0.0);
    }

    #[test]
    fn baseline_errors_propagate() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs));
        let baseline =
            EstimateConfig::new(ComponentKind::Adder, 8).with_device("Nonexistent-9000");
        assert_eq!(
            advisor.suggest_alternatives(&baseline),
            Err(EstimateError::UnknownDevice("Nonexistent-9000".into()))
        );
    }

    #[test]
    fn design_alternatives() {
        let (devices, archs) = catalogs();
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs));
        let metrics = DesignMetrics {
            modules: 1,
            io_bits: 24,
            register_bits: 8,
            max_complexity: 12,
            total_complexity: 30,
            logic_levels: 6,
            datapath_width: 8,
            ..DesignMetrics::default()
        };
        let ranked = advisor
            .suggest_design_alternatives(&metrics, &OperatingPoint::default())
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked
            .iter()
            .any(|o| o.delta == ParameterDelta::AddPipelineStages { stages: 2 }));
    }

    #[test]
    fn settings_from_config() {
        let (devices, archs) = catalogs();
        let settings = AdvisorSection {
            max_results: 1,
            include_device_alternatives: true,
        };
        let advisor = OptimizationAdvisor::new(EstimationEngine::new(&devices, &archs))
            .with_settings(&settings);
        let ranked = advisor
            .suggest_alternatives(&EstimateConfig::new(ComponentKind::Adder, 8))
            .unwrap();
        assert_eq!(ranked.len(), 1);
    }
}
