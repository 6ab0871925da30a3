//! Structured design intents produced by an upstream prompt interpreter.

use crate::config::{EstimateConfig, OperatingPoint};
use crate::error::EstimateError;
use hdlscope_arch::ComponentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parameter value in a [`DesignIntent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntentValue {
    /// An integer.
    Integer(i64),
    /// A non-integer number.
    Number(f64),
    /// A string.
    Text(String),
    /// A boolean flag.
    Flag(bool),
}

impl IntentValue {
    /// Interprets the value as an unsigned 32-bit count.
    ///
    /// Numeric strings and integral floats are accepted.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            IntentValue::Integer(n) => u32::try_from(*n).ok(),
            IntentValue::Number(x)
                if x.fract() == 0.0 && *x >= 0.0 && *x <= f64::from(u32::MAX) =>
            {
                Some(*x as u32)
            }
            IntentValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The string payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IntentValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// What a caller wants built: a component kind, its parameters and free-form
/// constraints.
///
/// ```json
/// {
///   "componentKind": "fifo",
///   "parameters": { "width": 32, "depth": 512 },
///   "constraints": ["frequency=200MHz", "low latency"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignIntent {
    /// Component kind name (e.g. "adder").
    #[serde(rename = "componentKind", alias = "component_kind")]
    pub component_kind: String,
    /// Named parameters: `width`, `depth`, `instances`, `architecture`.
    #[serde(default)]
    pub parameters: BTreeMap<String, IntentValue>,
    /// Constraint strings; `key=value` entries override the operating point.
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl DesignIntent {
    /// An intent with no parameters or constraints.
    pub fn new(component_kind: impl Into<String>) -> Self {
        Self {
            component_kind: component_kind.into(),
            parameters: BTreeMap::new(),
            constraints: Vec::new(),
        }
    }

    /// Adds a parameter.
    pub fn with_parameter(mut self, name: &str, value: IntentValue) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    /// Adds a constraint string.
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    fn count(&self, name: &'static str) -> Result<Option<u32>, EstimateError> {
        match self.parameters.get(name) {
            None => Ok(None),
            Some(value) => value.as_u32().map(Some).ok_or_else(|| {
                EstimateError::invalid(name, format!("{value:?} is not a non-negative integer"))
            }),
        }
    }
}

impl EstimateConfig {
    /// Builds a component request from an intent, starting from `defaults`.
    ///
    /// The architecture stays `None` unless the intent names one; the engine
    /// resolves it to the first registered architecture for the kind.
    pub fn from_intent(
        intent: &DesignIntent,
        defaults: &OperatingPoint,
    ) -> Result<Self, EstimateError> {
        let component: ComponentKind = intent
            .component_kind
            .parse()
            .map_err(|_| EstimateError::UnknownComponent(intent.component_kind.clone()))?;
        let width = intent
            .count("width")?
            .ok_or(EstimateError::MissingParameter("width"))?;
        let mut config = EstimateConfig::new(component, width).with_point(defaults.clone());
        config.depth = intent.count("depth")?;
        if let Some(instances) = intent.count("instances")? {
            config.instances = instances;
        }
        if let Some(value) = intent.parameters.get("architecture") {
            let name = value.as_text().ok_or_else(|| {
                EstimateError::invalid("architecture", format!("{value:?} is not a name"))
            })?;
            config.architecture = Some(config.parse_architecture(name)?);
        }
        for constraint in &intent.constraints {
            config.apply_constraint(constraint)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_arch::Architecture;

    #[test]
    fn deserialize_from_json() {
        let intent: DesignIntent = serde_json::from_str(
            r#"{
                "componentKind": "fifo",
                "parameters": {"width": 32, "depth": "512", "architecture": "distributed"},
                "constraints": ["frequency=200MHz", "low latency"]
            }"#,
        )
        .unwrap();
        let config = EstimateConfig::from_intent(&intent, &OperatingPoint::default()).unwrap();
        assert_eq!(config.component, ComponentKind::Fifo);
        assert_eq!(config.width, 32);
        assert_eq!(config.depth, Some(512));
        assert_eq!(config.architecture, Some(Architecture::Distributed));
        assert_eq!(config.point.frequency_mhz, 200.0);
    }

    #[test]
    fn component_kind_field_names() {
        let camel: DesignIntent =
            serde_json::from_str(r#"{"componentKind":"adder","parameters":{"width":8}}"#).unwrap();
        assert_eq!(camel.component_kind, "adder");
        assert_eq!(camel.parameters.get("width"), Some(&IntentValue::Integer(8)));
        let snake: DesignIntent = serde_json::from_str(r#"{"component_kind":"adder"}"#).unwrap();
        assert_eq!(snake, DesignIntent::new("adder"));
        let json = serde_json::to_string(&camel).unwrap();
        assert!(json.contains(r#""componentKind":"adder""#));
    }

    #[test]
    fn parameters_and_constraints_optional() {
        let intent: DesignIntent = serde_json::from_str(r#"{"component_kind": "adder"}"#).unwrap();
        assert!(intent.parameters.is_empty());
        assert!(intent.constraints.is_empty());
    }

    #[test]
    fn unknown_component() {
        let intent = DesignIntent::new("flux_capacitor");
        assert_eq!(
            EstimateConfig::from_intent(&intent, &OperatingPoint::default()),
            Err(EstimateError::UnknownComponent("flux_capacitor".into()))
        );
    }

    #[test]
    fn missing_width() {
        let intent = DesignIntent::new("adder");
        assert_eq!(
            EstimateConfig::from_intent(&intent, &OperatingPoint::default()),
            Err(EstimateError::MissingParameter("width"))
        );
    }

    #[test]
    fn negative_width_invalid() {
        let intent = DesignIntent::new("adder").with_parameter("width", IntentValue::Integer(-4));
        assert!(matches!(
            EstimateConfig::from_intent(&intent, &OperatingPoint::default()),
            Err(EstimateError::InvalidParameter { name: "width", .. })
        ));
    }

    #[test]
    fn defaults_carry_through() {
        let defaults = OperatingPoint {
            device: "Kintex-7".into(),
            ..OperatingPoint::default()
        };
        let intent = DesignIntent::new("counter")
            .with_parameter("width", IntentValue::Number(12.0))
            .with_constraint("device=Cyclone-IV");
        let config = EstimateConfig::from_intent(&intent, &defaults).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.point.device, "Cyclone-IV");
        assert_eq!(config.architecture, None);

        let intent = DesignIntent::new("counter").with_parameter("width", IntentValue::Integer(4));
        let config = EstimateConfig::from_intent(&intent, &defaults).unwrap();
        assert_eq!(config.point.device, "Kintex-7");
    }

    #[test]
    fn value_conversions() {
        assert_eq!(IntentValue::Integer(8).as_u32(), Some(8));
        assert_eq!(IntentValue::Number(8.5).as_u32(), None);
        assert_eq!(IntentValue::Text(" 16 ".into()).as_u32(), Some(16));
        assert_eq!(IntentValue::Flag(true).as_u32(), None);
        assert_eq!(IntentValue::Text("x".into()).as_text(), Some("x"));
    }
}
