//! The structural design model shared by extraction, lint and estimation.
//!
//! A [`DesignModel`] is the typed view of an HDL source text: its
//! [`Module`]s with their ports, signals, instances, procedural blocks,
//! continuous assignments and parameters. Every element carries the
//! 1-based source line it was found on. The model is plain serializable
//! data with no behavior beyond lookups and classification.

#![warn(missing_docs)]

pub mod assign;
pub mod design;
pub mod instance;
pub mod module;
pub mod param;
pub mod port;
pub mod process;
pub mod signal;

pub use assign::Assignment;
pub use design::DesignModel;
pub use instance::{Connection, Instance, ParamOverride};
pub use module::Module;
pub use param::{ParamKind, Parameter};
pub use port::{Port, PortDirection};
pub use process::{BlockKind, Edge, EdgeSensitivity, ProceduralAssignment, ProceduralBlock};
pub use signal::{Signal, SignalKind};
