//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::HdlscopeConfig;
use std::path::Path;

/// File name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "hdlscope.toml";

/// Loads and validates `hdlscope.toml` from a directory.
pub fn load_config(dir: &Path) -> Result<HdlscopeConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let content =
        std::fs::read_to_string(&path).map_err(|source| ConfigError::IoError { path, source })?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<HdlscopeConfig, ConfigError> {
    let config: HdlscopeConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks numeric ranges and parses string-encoded values.
fn validate_config(config: &HdlscopeConfig) -> Result<(), ConfigError> {
    let est = &config.estimate;
    est.frequency()
        .map_err(|e| invalid("estimate.frequency", e.to_string()))?;

    if let Some(v) = est.voltage_v {
        if !(v.is_finite() && v > 0.0) {
            return Err(invalid("estimate.voltage_v", "must be positive"));
        }
    }
    if let Some(t) = est.toggle_rate {
        if !(0.0..=1.0).contains(&t) {
            return Err(invalid("estimate.toggle_rate", "must be within [0, 1]"));
        }
    }
    if est.fanout == Some(0) {
        return Err(invalid("estimate.fanout", "must be at least 1"));
    }
    if let Some(p) = est.target_period_ns {
        if !(p.is_finite() && p > 0.0) {
            return Err(invalid("estimate.target_period_ns", "must be positive"));
        }
    }
    if let Some(t) = est.temperature_c {
        if !t.is_finite() {
            return Err(invalid("estimate.temperature_c", "must be a finite number"));
        }
    }
    if config.advisor.max_results == 0 {
        return Err(invalid("advisor.max_results", "must be at least 1"));
    }
    for rule in &config.lint.deny {
        if config.lint.allow.contains(rule) {
            return Err(invalid(
                "lint",
                format!("rule '{rule}' is listed in both deny and allow"),
            ));
        }
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field,
        reason: reason.into(),
    }
}
