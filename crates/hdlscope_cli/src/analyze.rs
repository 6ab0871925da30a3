//! `hdlscope analyze`: the full analysis report as JSON.

use std::path::Path;

use hdlscope_arch::{ArchitectureCatalog, DeviceCatalog};
use hdlscope_estimate::DesignIntent;
use hdlscope_report::{analyze, AnalysisContext, AnalysisReport};
use log::warn;
use serde_json::json;

use crate::pipeline::{load_settings, map_files};
use crate::{AnalyzeArgs, GlobalArgs};

/// Runs the `hdlscope analyze` command.
///
/// A single input prints its report object; several inputs print an array
/// of `{ "file", "report" }` objects in argument order.
pub fn run(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global, args.files.first().map(|p| p.as_path()))?;
    let intent = match &args.intent {
        Some(path) => Some(read_intent(path)?),
        None => None,
    };

    let devices = DeviceCatalog::builtin();
    let archs = ArchitectureCatalog::builtin();
    let ctx = AnalysisContext::from_config(&devices, &archs, &config)?;

    if !global.quiet {
        eprintln!("   Analyzing {} file(s)", args.files.len());
    }

    let reports: Vec<AnalysisReport> =
        map_files(&args.files, |_, text| analyze(text, intent.as_ref(), &ctx))?;

    for (path, report) in args.files.iter().zip(&reports) {
        if let Some(err) = &report.estimation_error {
            warn!("{}: estimation skipped: {err}", path.display());
        }
    }

    let output = if reports.len() == 1 {
        serde_json::to_string_pretty(&reports[0])?
    } else {
        let files: Vec<_> = args
            .files
            .iter()
            .zip(&reports)
            .map(|(path, report)| json!({ "file": path.display().to_string(), "report": report }))
            .collect();
        serde_json::to_string_pretty(&files)?
    };
    println!("{output}");
    Ok(0)
}

/// Reads a JSON design intent.
fn read_intent(path: &Path) -> Result<DesignIntent, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read intent {}: {e}", path.display()))?;
    let intent = serde_json::from_str(&text)
        .map_err(|e| format!("invalid intent {}: {e}", path.display()))?;
    Ok(intent)
}
