//! Conformance test helpers for hdlscope.
//!
//! Provides shared pipeline functions that run HDL source text through
//! extraction and linting (and, for reports, estimation) and return
//! structured results for assertion in integration tests.

#![warn(missing_docs)]

use hdlscope_arch::{ArchitectureCatalog, DeviceCatalog};
use hdlscope_config::LintConfig;
use hdlscope_diagnostics::{Finding, Severity};
use hdlscope_estimate::{DesignIntent, EstimationEngine};
use hdlscope_lint::LintEngine;
use hdlscope_model::DesignModel;
use hdlscope_report::{analyze, AnalysisContext, AnalysisReport};
use hdlscope_source::SourceText;

/// Result of running extraction and the lint rules over one source text.
pub struct PipelineResult {
    /// The extracted design model.
    pub model: DesignModel,
    /// Findings from the syntax checks.
    pub syntax_findings: Vec<Finding>,
    /// Findings from the lint rules.
    pub lint_findings: Vec<Finding>,
}

impl PipelineResult {
    /// Syntax findings followed by lint findings.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.syntax_findings.iter().chain(&self.lint_findings)
    }

    /// Findings produced by the named rule.
    pub fn by_rule(&self, rule: &str) -> Vec<&Finding> {
        self.findings().filter(|f| f.rule == rule).collect()
    }

    /// Number of findings with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings().filter(|f| f.severity == severity).count()
    }
}

/// Runs extraction and the default lint rules.
pub fn full_pipeline(text: &str) -> PipelineResult {
    run_pipeline(text, &LintEngine::with_defaults())
}

/// Runs extraction and the lint rules with `deny`/`allow` overrides.
pub fn full_pipeline_with_lint(text: &str, deny: &[&str], allow: &[&str]) -> PipelineResult {
    let config = LintConfig {
        deny: deny.iter().map(|s| s.to_string()).collect(),
        allow: allow.iter().map(|s| s.to_string()).collect(),
    };
    run_pipeline(text, &LintEngine::new(&config))
}

fn run_pipeline(text: &str, engine: &LintEngine) -> PipelineResult {
    let source = SourceText::new(text);
    let (model, syntax_findings) = hdlscope_extract::extract_source(&source);
    let lint_findings = engine.check(&model, &source);
    PipelineResult {
        model,
        syntax_findings,
        lint_findings,
    }
}

/// Runs `f` with an estimation engine over the built-in catalogs.
pub fn with_engine<R>(f: impl FnOnce(EstimationEngine<'_>) -> R) -> R {
    let devices = DeviceCatalog::builtin();
    let archs = ArchitectureCatalog::builtin();
    f(EstimationEngine::new(&devices, &archs))
}

/// Produces the full analysis report with default settings.
pub fn analyze_text(text: &str, intent: Option<&DesignIntent>) -> AnalysisReport {
    let devices = DeviceCatalog::builtin();
    let archs = ArchitectureCatalog::builtin();
    let ctx = AnalysisContext::new(&devices, &archs);
    analyze(text, intent, &ctx)
}
