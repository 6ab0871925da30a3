//! The top-level design model.

use crate::{Module, Parameter};
use serde::{Deserialize, Serialize};

/// Every module found in a source text, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignModel {
    /// Modules in source order.
    pub modules: Vec<Module>,
    /// Parameters declared outside any module.
    pub parameters: Vec<Parameter>,
}

impl DesignModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Modules not instantiated by any other module in this model.
    pub fn top_modules(&self) -> Vec<&Module> {
        self.modules
            .iter()
            .filter(|m| {
                !self
                    .modules
                    .iter()
                    .flat_map(|other| other.instances.iter())
                    .any(|inst| inst.module_name == m.name)
            })
            .collect()
    }

    /// Total number of ports across all modules.
    pub fn port_count(&self) -> usize {
        self.modules.iter().map(|m| m.ports.len()).sum()
    }

    /// Returns `true` if no module was found.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Instance;

    #[test]
    fn top_modules_excludes_instantiated() {
        let mut top = Module::new("top", 1);
        top.instances.push(Instance {
            module_name: "leaf".into(),
            name: "u_leaf".into(),
            parameters: vec![],
            connections: vec![],
            line: 3,
        });
        let leaf = Module::new("leaf", 10);
        let model = DesignModel {
            modules: vec![top, leaf],
            parameters: vec![],
        };
        let tops: Vec<&str> = model.top_modules().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(tops, vec!["top"]);
        assert!(model.module("leaf").is_some());
    }

    #[test]
    fn serde_roundtrip_preserves_model() {
        let model = DesignModel {
            modules: vec![Module::new("m", 1)],
            parameters: vec![],
        };
        let json = serde_json::to_string(&model).unwrap();
        let back: DesignModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
