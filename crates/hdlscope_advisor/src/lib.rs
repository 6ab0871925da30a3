//! Ranked optimization suggestions.
//!
//! The [`OptimizationAdvisor`] re-runs the estimation engine over alternative
//! architectures, devices and voltage/frequency points, models pipelining
//! analytically, and ranks every candidate against the baseline by a
//! weighted score of frequency, area and power improvement.

#![warn(missing_docs)]

pub mod advisor;
pub mod candidate;

pub use advisor::OptimizationAdvisor;
pub use candidate::{Optimization, ParameterDelta};
