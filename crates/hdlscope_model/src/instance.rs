//! Module instantiations.

use serde::{Deserialize, Serialize};

/// A port connection on an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The port name for `.port(expr)`, `None` for positional connections.
    pub port: Option<String>,
    /// The connected expression text (empty for `.port()`).
    pub expr: String,
}

/// A parameter override in `#(...)` on an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamOverride {
    /// The parameter name for `.NAME(value)`, `None` for positional overrides.
    pub name: Option<String>,
    /// The value text.
    pub value: String,
}

/// An instantiation of another module.
///
/// Connections are recorded as written; they are not checked against the
/// instantiated module's ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Name of the instantiated module.
    pub module_name: String,
    /// The instance name.
    pub name: String,
    /// Parameter overrides in written order.
    pub parameters: Vec<ParamOverride>,
    /// Port connections in written order.
    pub connections: Vec<Connection>,
    /// 1-based line of the module name.
    pub line: u32,
}

impl Instance {
    /// Returns `true` if every connection is named.
    pub fn is_named(&self) -> bool {
        self.connections.iter().all(|c| c.port.is_some())
    }

    /// Looks up the expression connected to `port`.
    pub fn connection(&self, port: &str) -> Option<&str> {
        self.connections
            .iter()
            .find(|c| c.port.as_deref() == Some(port))
            .map(|c| c.expr.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup() {
        let inst = Instance {
            module_name: "adder".into(),
            name: "u0".into(),
            parameters: vec![],
            connections: vec![
                Connection {
                    port: Some("a".into()),
                    expr: "x".into(),
                },
                Connection {
                    port: Some("y".into()),
                    expr: "sum[3:0]".into(),
                },
            ],
            line: 4,
        };
        assert!(inst.is_named());
        assert_eq!(inst.connection("y"), Some("sum[3:0]"));
        assert_eq!(inst.connection("b"), None);
    }

    #[test]
    fn positional_is_not_named() {
        let inst = Instance {
            module_name: "adder".into(),
            name: "u1".into(),
            parameters: vec![],
            connections: vec![Connection {
                port: None,
                expr: "x".into(),
            }],
            line: 1,
        };
        assert!(!inst.is_named());
    }
}
