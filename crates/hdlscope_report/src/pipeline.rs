//! Composition of extraction, linting, estimation and advice.

use crate::report::AnalysisReport;
use hdlscope_advisor::{Optimization, OptimizationAdvisor};
use hdlscope_arch::{ArchitectureCatalog, DeviceCatalog};
use hdlscope_config::{AdvisorSection, HdlscopeConfig};
use hdlscope_estimate::{
    DesignIntent, DesignMetrics, EstimateConfig, EstimateError, Estimates, EstimationEngine,
    OperatingPoint,
};
use hdlscope_lint::LintEngine;
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;
use log::{debug, warn};

/// Shared, read-only inputs of [`analyze`]: catalogs, the configured rule
/// engine, the default operating point and advisor settings.
///
/// A context is built once and can be shared across threads.
pub struct AnalysisContext<'a> {
    engine: EstimationEngine<'a>,
    lint: LintEngine,
    point: OperatingPoint,
    advisor: AdvisorSection,
}

impl<'a> AnalysisContext<'a> {
    /// A context with default lint, operating point and advisor settings.
    pub fn new(devices: &'a DeviceCatalog, architectures: &'a ArchitectureCatalog) -> Self {
        Self {
            engine: EstimationEngine::new(devices, architectures),
            lint: LintEngine::with_defaults(),
            point: OperatingPoint::default(),
            advisor: AdvisorSection::default(),
        }
    }

    /// A context configured from `hdlscope.toml`.
    pub fn from_config(
        devices: &'a DeviceCatalog,
        architectures: &'a ArchitectureCatalog,
        config: &HdlscopeConfig,
    ) -> Result<Self, EstimateError> {
        Ok(Self {
            engine: EstimationEngine::new(devices, architectures),
            lint: LintEngine::new(&config.lint),
            point: OperatingPoint::from_section(&config.estimate)?,
            advisor: config.advisor.clone(),
        })
    }

    /// Replaces the default operating point.
    pub fn with_point(mut self, point: OperatingPoint) -> Self {
        self.point = point;
        self
    }

    /// Replaces the lint engine.
    pub fn with_lint(mut self, lint: LintEngine) -> Self {
        self.lint = lint;
        self
    }

    /// The estimation engine.
    pub fn engine(&self) -> EstimationEngine<'a> {
        self.engine
    }

    /// The default operating point.
    pub fn point(&self) -> &OperatingPoint {
        &self.point
    }

    fn advisor(&self) -> OptimizationAdvisor<'a> {
        OptimizationAdvisor::new(self.engine).with_settings(&self.advisor)
    }
}

/// What was estimated and how it turned out.
struct EstimationOutcome {
    request: Option<EstimateConfig>,
    estimates: Option<Estimates>,
    error: Option<String>,
    optimizations: Vec<Optimization>,
}

/// Runs the whole pipeline over one source text.
///
/// With an intent, the intent's component is estimated and advised on;
/// otherwise the extracted design is, unless it has no modules. Never fails:
/// estimation errors are recorded in [`AnalysisReport::estimation_error`].
pub fn analyze(
    text: &str,
    intent: Option<&DesignIntent>,
    ctx: &AnalysisContext<'_>,
) -> AnalysisReport {
    let source = SourceText::new(text);
    let (design_model, syntax_findings) = hdlscope_extract::extract_source(&source);
    let lint_findings = ctx.lint.check(&design_model, &source);
    let metrics = DesignMetrics::from_model(&design_model);
    debug!(
        "analyzed {} modules: {} syntax findings, {} lint findings",
        design_model.modules.len(),
        syntax_findings.len(),
        lint_findings.len()
    );

    let outcome = estimate(intent, &design_model, &metrics, ctx);
    let (resource_estimate, timing_estimate, power_estimate, thermal_estimate) =
        match outcome.estimates {
            Some(e) => (Some(e.resources), Some(e.timing), Some(e.power), Some(e.thermal)),
            None => (None, None, None, None),
        };

    AnalysisReport {
        source_hash: source.content_hash(),
        design_model,
        syntax_findings,
        lint_findings,
        metrics,
        estimate_request: outcome.request,
        resource_estimate,
        timing_estimate,
        power_estimate,
        thermal_estimate,
        estimation_error: outcome.error,
        optimizations: outcome.optimizations,
    }
}

fn estimate(
    intent: Option<&DesignIntent>,
    model: &DesignModel,
    metrics: &DesignMetrics,
    ctx: &AnalysisContext<'_>,
) -> EstimationOutcome {
    let mut outcome = EstimationOutcome {
        request: None,
        estimates: None,
        error: None,
        optimizations: Vec::new(),
    };
    let result = match intent {
        Some(intent) => ctx
            .engine
            .config_for_intent(intent, &ctx.point)
            .and_then(|config| {
                let estimates = ctx.engine.estimate_all(&config)?;
                let optimizations = ctx.advisor().suggest_alternatives(&config)?;
                outcome.request = Some(config);
                Ok((estimates, optimizations))
            }),
        None if model.is_empty() => return outcome,
        None => ctx
            .engine
            .estimate_design(metrics, &ctx.point)
            .and_then(|estimates| {
                let optimizations = ctx
                    .advisor()
                    .suggest_design_alternatives(metrics, &ctx.point)?;
                Ok((estimates, optimizations))
            }),
    };
    match result {
        Ok((estimates, optimizations)) => {
            outcome.estimates = Some(estimates);
            outcome.optimizations = optimizations;
        }
        Err(e) => {
            warn!("estimation failed: {e}");
            outcome.error = Some(e.to_string());
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_config::load_config_from_str;
    use hdlscope_estimate::IntentValue;

    const LATCHY: &str = "\
module latchy(input a, input en, output reg q);
    always @(*) begin
        if (en)
            q = a;
    end
endmodule
";

    fn catalogs() -> (DeviceCatalog, ArchitectureCatalog) {
        (DeviceCatalog::builtin(), ArchitectureCatalog::builtin())
    }

    #[test]
    fn design_path_fills_every_section() {
        let (devices, archs) = catalogs();
        let ctx = AnalysisContext::new(&devices, &archs);
        let report = analyze(LATCHY, None, &ctx);
        assert_eq!(report.design_model.modules.len(), 1);
        assert!(report.syntax_findings.is_empty());
        assert!(report.lint_findings.iter().any(|f| f.rule == "inferred_latch"));
        assert!(report.has_estimates());
        assert!(report.estimation_error.is_none());
        assert!(report.estimate_request.is_none());
        assert!(!report.optimizations.is_empty());
    }

    #[test]
    fn intent_path_estimates_the_component() {
        let (devices, archs) = catalogs();
        let ctx = AnalysisContext::new(&devices, &archs);
        let intent = DesignIntent::new("adder").with_parameter("width", IntentValue::Integer(32));
        let report = analyze(LATCHY, Some(&intent), &ctx);
        let request = report.estimate_request.as_ref().unwrap();
        assert_eq!(request.width, 32);
        assert_eq!(report.timing_estimate.as_ref().unwrap().device, "Artix-7");
        assert!(report.optimizations.len() <= 5);
    }

    #[test]
    fn estimation_error_keeps_other_sections() {
        let (devices, archs) = catalogs();
        let ctx = AnalysisContext::new(&devices, &archs).with_point(OperatingPoint {
            device: "Nonexistent-9000".into(),
            ..OperatingPoint::default()
        });
        let report = analyze(LATCHY, None, &ctx);
        assert_eq!(
            report.estimation_error.as_deref(),
            Some("unknown device 'Nonexistent-9000'")
        );
        assert!(!report.has_estimates());
        assert!(report.optimizations.is_empty());
        assert_eq!(report.design_model.modules.len(), 1);
        assert!(!report.lint_findings.is_empty());
    }

    #[test]
    fn empty_input_skips_estimation() {
        let (devices, archs) = catalogs();
        let ctx = AnalysisContext::new(&devices, &archs);
        let report = analyze("", None, &ctx);
        assert!(report.design_model.is_empty());
        assert!(!report.has_estimates());
        assert!(report.estimation_error.is_none());
    }

    #[test]
    fn config_drives_lint_and_point() {
        let (devices, archs) = catalogs();
        let config = load_config_from_str(
            r#"
[estimate]
device = "Kintex-7"

[lint]
deny = ["inferred_latch"]
"#,
        )
        .unwrap();
        let ctx = AnalysisContext::from_config(&devices, &archs, &config).unwrap();
        let report = analyze(LATCHY, None, &ctx);
        assert!(report.has_errors());
        assert_eq!(report.resource_estimate.as_ref().unwrap().device, "Kintex-7");
    }

    #[test]
    fn report_is_deterministic_and_serializable() {
        let (devices, archs) = catalogs();
        let ctx = AnalysisContext::new(&devices, &archs);
        let a = analyze(LATCHY, None, &ctx);
        let b = analyze(LATCHY, None, &ctx);
        assert_eq!(a, b);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["source_hash"].as_str().unwrap().len(), 32);
        assert!(json["lint_findings"].is_array());
        assert!(json["estimation_error"].is_null());
    }
}
