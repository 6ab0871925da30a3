//! Deterministic resource, timing, power and thermal estimation.
//!
//! The [`EstimationEngine`] borrows a [`DeviceCatalog`](hdlscope_arch::DeviceCatalog)
//! and an [`ArchitectureCatalog`](hdlscope_arch::ArchitectureCatalog) and
//! evaluates closed-form models for either a single datapath component
//! ([`EstimateConfig`]) or a whole extracted design ([`DesignMetrics`]).
//! Every estimator is a pure function of its inputs: the same call always
//! returns bit-identical records, and an invalid request returns an
//! [`EstimateError`] without any partial result.
//!
//! ```
//! use hdlscope_arch::{ArchitectureCatalog, ComponentKind, DeviceCatalog};
//! use hdlscope_estimate::{EstimateConfig, EstimationEngine};
//!
//! let devices = DeviceCatalog::builtin();
//! let archs = ArchitectureCatalog::builtin();
//! let engine = EstimationEngine::new(&devices, &archs);
//! let timing = engine
//!     .estimate_timing(&EstimateConfig::new(ComponentKind::Adder, 16))
//!     .unwrap();
//! assert!(timing.max_frequency_mhz > 0.0);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod intent;
pub mod metrics;
pub mod power;
pub mod resource;
pub mod thermal;
pub mod timing;

pub use config::{EstimateConfig, OperatingPoint};
pub use engine::{EstimationEngine, Estimates};
pub use error::EstimateError;
pub use intent::{DesignIntent, IntentValue};
pub use metrics::DesignMetrics;
pub use power::PowerEstimate;
pub use resource::{ResourceEstimate, Utilization};
pub use thermal::{ThermalEstimate, ThermalStatus, MAX_JUNCTION_C};
pub use timing::TimingEstimate;
