//! `hdlscope extract`: prints the structural model of each file as JSON.

use serde_json::json;

use crate::pipeline::map_files;
use crate::{ExtractArgs, GlobalArgs};

/// Runs the `hdlscope extract` command.
///
/// Prints one JSON object per file with the design model and syntax
/// findings. Extraction never fails, so the exit code is always 0.
pub fn run(args: &ExtractArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let results = map_files(&args.files, |path, text| {
        let (model, findings) = hdlscope_extract::extract(text);
        (path.display().to_string(), model, findings)
    })?;

    if !global.quiet {
        let modules: usize = results.iter().map(|(_, model, _)| model.modules.len()).sum();
        eprintln!("   Extracted {modules} module(s) from {} file(s)", results.len());
    }

    let files: Vec<_> = results
        .iter()
        .map(|(path, model, findings)| {
            json!({ "file": path, "design_model": model, "syntax_findings": findings })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(0)
}
