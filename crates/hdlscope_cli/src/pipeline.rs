//! Shared helpers for CLI commands: config resolution and parallel file processing.

use std::path::{Path, PathBuf};

use hdlscope_config::{load_config, load_config_from_str, HdlscopeConfig, CONFIG_FILE_NAME};
use log::debug;
use rayon::prelude::*;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `hdlscope.toml`.
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Loads the configuration for a command.
///
/// `--config` may name a file or a directory containing `hdlscope.toml`.
/// Otherwise the nearest `hdlscope.toml` above the first input (or the
/// current directory) is used, and the built-in defaults when there is none.
pub fn load_settings(
    global: &GlobalArgs,
    first_input: Option<&Path>,
) -> Result<HdlscopeConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let path = PathBuf::from(config_path);
        debug!("using configuration {}", path.display());
        if path.is_dir() {
            return Ok(load_config(&path)?);
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        return Ok(load_config_from_str(&content)?);
    }

    let start = match first_input.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    match find_config_dir(&start) {
        Some(dir) => {
            debug!("using configuration in {}", dir.display());
            Ok(load_config(&dir)?)
        }
        None => Ok(HdlscopeConfig::default()),
    }
}

/// Reads every input file, in argument order.
pub fn read_sources(files: &[PathBuf]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()).into())
        })
        .collect()
}

/// Reads the inputs and applies `f` to each in parallel.
///
/// Results come back in argument order.
pub fn map_files<T, F>(files: &[PathBuf], f: F) -> Result<Vec<T>, Box<dyn std::error::Error>>
where
    T: Send,
    F: Fn(&Path, &str) -> T + Sync,
{
    let texts = read_sources(files)?;
    Ok(files
        .par_iter()
        .zip(texts.par_iter())
        .map(|(path, text)| f(path, text))
        .collect())
}
