//! Lint engine that manages rule registration, configuration, and execution.
//!
//! The `LintEngine` accepts a `LintConfig` to control which rules are denied
//! or allowed, then runs each enabled rule over the design in catalog order.

use std::collections::HashSet;

use hdlscope_config::LintConfig;
use hdlscope_diagnostics::{Finding, FindingSink, Severity};
use hdlscope_model::DesignModel;
use hdlscope_source::SourceText;
use log::debug;

use crate::rules::register_builtin_rules;
use crate::LintRule;

/// The lint engine that runs the rule catalog over a design.
///
/// Rules are registered at construction time and run in registration
/// order. Rules in the `allow` set are skipped; findings of rules in the
/// `deny` set are re-created at error severity.
pub struct LintEngine {
    /// All registered lint rules, in catalog order.
    rules: Vec<Box<dyn LintRule>>,
    /// Rule ids whose findings are promoted to error severity.
    denied: HashSet<String>,
    /// Rule ids that are not run.
    allowed: HashSet<String>,
}

impl LintEngine {
    /// Creates a lint engine with the builtin catalog, configured by `config`.
    pub fn new(config: &LintConfig) -> Self {
        let mut engine = Self {
            rules: Vec::new(),
            denied: config.deny.iter().cloned().collect(),
            allowed: config.allow.iter().cloned().collect(),
        };
        register_builtin_rules(&mut engine);
        engine
    }

    /// Creates a lint engine with default configuration (no overrides).
    pub fn with_defaults() -> Self {
        Self::new(&LintConfig::default())
    }

    /// Registers a lint rule at the end of the catalog.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Returns the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the ids of all registered rules in catalog order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the registered rules in catalog order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Runs every enabled rule and returns the findings in catalog order.
    ///
    /// Findings are never deduplicated across rules.
    pub fn check(&self, model: &DesignModel, source: &SourceText) -> Vec<Finding> {
        let sink = FindingSink::new();
        self.run(model, source, &sink);
        sink.take_all()
    }

    /// Runs every enabled rule, emitting findings into `sink`.
    pub fn run(&self, model: &DesignModel, source: &SourceText, sink: &FindingSink) {
        for rule in &self.rules {
            if self.allowed.contains(rule.name()) {
                continue;
            }
            let rule_sink = FindingSink::new();
            rule.check(model, source, &rule_sink);
            let findings = rule_sink.take_all();
            if !findings.is_empty() {
                debug!("{} ({}): {} findings", rule.name(), rule.code(), findings.len());
            }
            let denied = self.denied.contains(rule.name());
            for finding in findings {
                if denied {
                    sink.emit(finding.promoted_to(Severity::Error));
                } else {
                    sink.emit(finding);
                }
            }
        }
    }
}
