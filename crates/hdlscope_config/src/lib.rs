//! Parsing and validation of `hdlscope.toml` configuration files.
//!
//! The configuration supplies estimation defaults (device, operating point),
//! lint rule overrides, and advisor settings. Every section is optional;
//! an empty file yields the built-in defaults.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
