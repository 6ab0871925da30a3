//! Error types for `hdlscope.toml` loading.

use std::path::PathBuf;

/// Why an `hdlscope.toml` could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists in name only: it could not be read.
    #[error("cannot read {}: {source}", path.display())]
    IoError {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid TOML or has unknown keys.
    #[error("malformed hdlscope.toml: {0}")]
    ParseError(String),

    /// A key parsed but its value is out of range.
    #[error("invalid {field}: {reason}")]
    ValidationError {
        /// Dotted key, e.g. `estimate.voltage_v`.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}
