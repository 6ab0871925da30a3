//! Errors returned by estimation calls.

use hdlscope_arch::ComponentKind;
use thiserror::Error;

/// A caller contract violation that aborts one estimation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// The device name matches nothing in the device catalog.
    #[error("unknown device '{0}'")]
    UnknownDevice(String),

    /// No profile is registered for the (component, architecture) pair.
    #[error("unknown architecture '{architecture}' for {component}")]
    UnknownArchitecture {
        /// The component kind requested.
        component: ComponentKind,
        /// The architecture name requested.
        architecture: String,
    },

    /// The component kind name is not recognized.
    #[error("unknown component kind '{0}'")]
    UnknownComponent(String),

    /// A parameter is present but out of range or malformed.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A required parameter is absent.
    #[error("missing parameter '{0}'")]
    MissingParameter(&'static str),
}

impl EstimateError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EstimateError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
