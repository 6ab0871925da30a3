//! Logger installation for the `hdlscope` binary.

use env_logger::Builder;
use log::LevelFilter;

/// Level used when neither `-q` nor `-v` is given.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Picks the log level from the global flags; `-v` wins over `-q`.
pub fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        DEFAULT_LEVEL
    }
}

/// Installs `env_logger` at the level implied by the flags.
///
/// `RUST_LOG`, when set, overrides the flag-derived level.
pub fn init(quiet: bool, verbose: bool) {
    let _ = Builder::new()
        .filter_level(level_for(quiet, verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
