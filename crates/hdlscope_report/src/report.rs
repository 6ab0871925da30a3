//! The analysis report record.

use hdlscope_advisor::Optimization;
use hdlscope_common::ContentHash;
use hdlscope_diagnostics::{Finding, Severity};
use hdlscope_estimate::{
    DesignMetrics, EstimateConfig, PowerEstimate, ResourceEstimate, ThermalEstimate,
    TimingEstimate,
};
use hdlscope_model::DesignModel;
use serde::{Deserialize, Serialize};

/// Everything derived from one source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// XXH3-128 of the analyzed text.
    pub source_hash: ContentHash,
    /// The extracted structural model.
    pub design_model: DesignModel,
    /// Findings of the structural checks, in check order.
    pub syntax_findings: Vec<Finding>,
    /// Findings of the rule catalog, in catalog order.
    pub lint_findings: Vec<Finding>,
    /// Structural metrics of the model.
    pub metrics: DesignMetrics,
    /// The component request, when estimation was driven by an intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_request: Option<EstimateConfig>,
    /// Resource estimate, absent if estimation failed or was not run.
    pub resource_estimate: Option<ResourceEstimate>,
    /// Timing estimate.
    pub timing_estimate: Option<TimingEstimate>,
    /// Power estimate.
    pub power_estimate: Option<PowerEstimate>,
    /// Thermal estimate.
    pub thermal_estimate: Option<ThermalEstimate>,
    /// Why estimation failed, if it did.
    pub estimation_error: Option<String>,
    /// Ranked alternatives.
    pub optimizations: Vec<Optimization>,
}

impl AnalysisReport {
    /// Syntax findings followed by lint findings.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.syntax_findings.iter().chain(self.lint_findings.iter())
    }

    /// Returns true if any finding has error severity.
    pub fn has_errors(&self) -> bool {
        self.findings().any(|f| f.severity == Severity::Error)
    }

    /// Number of findings at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings().filter(|f| f.severity == severity).count()
    }

    /// Returns true if all four estimates are present.
    pub fn has_estimates(&self) -> bool {
        self.resource_estimate.is_some()
            && self.timing_estimate.is_some()
            && self.power_estimate.is_some()
            && self.thermal_estimate.is_some()
    }
}
