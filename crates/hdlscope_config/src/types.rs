//! Configuration types deserialized from `hdlscope.toml`.

use hdlscope_common::{Frequency, ParseFrequencyError};
use serde::Deserialize;

/// The top-level configuration parsed from `hdlscope.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HdlscopeConfig {
    /// Default operating point for estimation.
    #[serde(default)]
    pub estimate: EstimateSection,
    /// Lint rule overrides.
    #[serde(default)]
    pub lint: LintConfig,
    /// Optimization advisor settings.
    #[serde(default)]
    pub advisor: AdvisorSection,
}

/// The `[estimate]` section: defaults applied to every estimation call.
///
/// Unset fields fall back to the engine's built-in defaults (Artix-7,
/// 100 MHz, 25 °C, 1.0 V, slowest speed grade).
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateSection {
    /// Target device name from the device catalog (e.g. "Artix-7").
    pub device: Option<String>,
    /// Operating clock frequency (e.g. "150MHz"; bare numbers are MHz).
    pub frequency: Option<String>,
    /// Ambient temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// Core supply voltage in volts.
    pub voltage_v: Option<f64>,
    /// Speed grade: "fastest", "mid" or "slowest".
    pub speed_grade: Option<String>,
    /// Average fanout used for routing delay.
    pub fanout: Option<u32>,
    /// Average signal toggle rate in `[0, 1]`.
    pub toggle_rate: Option<f64>,
    /// Clock period that setup slack is measured against, in ns.
    pub target_period_ns: Option<f64>,
}

impl EstimateSection {
    /// Parses the configured frequency, if any.
    pub fn frequency(&self) -> Result<Option<Frequency>, ParseFrequencyError> {
        self.frequency.as_deref().map(str::parse).transpose()
    }
}

/// The `[lint]` section.
///
/// Rule names are the snake_case rule identifiers (e.g. `inferred_latch`).
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Rules whose findings are promoted to error severity.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Rules that are not run at all.
    #[serde(default)]
    pub allow: Vec<String>,
}

/// The `[advisor]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvisorSection {
    /// How many ranked alternatives to keep.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Whether migrating to other catalog devices is proposed.
    #[serde(default)]
    pub include_device_alternatives: bool,
}

impl Default for AdvisorSection {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            include_device_alternatives: false,
        }
    }
}

fn default_max_results() -> usize {
    5
}
