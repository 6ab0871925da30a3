//! Optimization advice over the built-in catalogs.

use hdlscope_advisor::{OptimizationAdvisor, ParameterDelta};
use hdlscope_arch::{Architecture, ComponentKind};
use hdlscope_conformance::with_engine;
use hdlscope_estimate::{EstimateConfig, EstimateError};

#[test]
fn alternatives_are_ranked_and_truncated() {
    with_engine(|engine| {
        let baseline = EstimateConfig::new(ComponentKind::Multiplier, 16)
            .with_architecture(Architecture::Array);
        let advice = OptimizationAdvisor::new(engine)
            .suggest_alternatives(&baseline)
            .unwrap();
        assert!(!advice.is_empty());
        assert!(advice.len() <= 5);
        for pair in advice.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(advice.iter().all(|o| !matches!(
            o.delta,
            ParameterDelta::SwitchArchitecture { to: Architecture::Array, .. }
        )));
    });
}

#[test]
fn advice_is_deterministic() {
    with_engine(|engine| {
        let advisor = OptimizationAdvisor::new(engine).with_device_alternatives(true);
        let baseline = EstimateConfig::new(ComponentKind::Adder, 32)
            .with_architecture(Architecture::RippleCarry);
        assert_eq!(
            advisor.suggest_alternatives(&baseline).unwrap(),
            advisor.suggest_alternatives(&baseline).unwrap()
        );
    });
}

#[test]
fn unknown_baseline_device_fails() {
    with_engine(|engine| {
        let baseline = EstimateConfig::new(ComponentKind::Counter, 8).with_device("Nope-1");
        let err = OptimizationAdvisor::new(engine)
            .suggest_alternatives(&baseline)
            .unwrap_err();
        assert_eq!(err, EstimateError::UnknownDevice("Nope-1".into()));
    });
}
