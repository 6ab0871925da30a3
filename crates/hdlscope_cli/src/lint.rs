//! `hdlscope lint`: syntax checks and lint rules over Verilog files.
//!
//! Each file is read, extracted and linted independently (in parallel);
//! findings are then rendered in argument order. Syntax findings come first
//! for each file, followed by lint findings in rule registration order.

use hdlscope_config::LintConfig;
use hdlscope_diagnostics::{Finding, FindingRenderer, Severity, TerminalRenderer};
use hdlscope_lint::LintEngine;
use hdlscope_source::SourceText;
use serde_json::json;

use crate::pipeline::{load_settings, map_files};
use crate::{GlobalArgs, LintArgs, ReportFormat};

/// Findings for one input file.
struct FileFindings {
    path: String,
    source: SourceText,
    findings: Vec<Finding>,
}

/// Runs the `hdlscope lint` command.
///
/// Returns exit code 1 if any finding has error severity, 0 otherwise.
pub fn run(args: &LintArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_settings(global, args.files.first().map(|p| p.as_path()))?;
    let engine = LintEngine::new(&merge_lint_config(&config.lint, args));

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Checking {} file(s) with {} rule(s)",
            args.files.len(),
            engine.rule_count()
        );
    }

    let results = map_files(&args.files, |path, text| {
        let source = SourceText::new(text);
        let (model, mut findings) = hdlscope_extract::extract_source(&source);
        findings.extend(engine.check(&model, &source));
        FileFindings {
            path: path.display().to_string(),
            source,
            findings,
        }
    })?;

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for file in &results {
                for finding in &file.findings {
                    eprintln!("{}", renderer.render(finding, &file.path, &file.source));
                }
            }
        }
        ReportFormat::Json => {
            let files: Vec<_> = results
                .iter()
                .map(|file| json!({ "file": file.path, "findings": file.findings }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
    }

    let count = |severity: Severity| {
        results
            .iter()
            .flat_map(|file| &file.findings)
            .filter(|f| f.severity == severity)
            .count()
    };
    let error_count = count(Severity::Error);
    let warning_count = count(Severity::Warning);

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Result: {error_count} error(s), {warning_count} warning(s)");
    }

    Ok(if error_count > 0 { 1 } else { 0 })
}

/// Merges CLI `--allow`/`--deny` flags with the config file's lint section.
///
/// CLI flags take precedence: a rule named on the command line is removed
/// from the opposite config list.
fn merge_lint_config(config: &LintConfig, args: &LintArgs) -> LintConfig {
    let mut deny = config.deny.clone();
    let mut allow = config.allow.clone();

    for rule in &args.deny {
        allow.retain(|r| r != rule);
        if !deny.contains(rule) {
            deny.push(rule.clone());
        }
    }
    for rule in &args.allow {
        deny.retain(|r| r != rule);
        if !allow.contains(rule) {
            allow.push(rule.clone());
        }
    }

    LintConfig { deny, allow }
}
