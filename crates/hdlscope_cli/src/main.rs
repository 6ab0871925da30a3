//! `hdlscope` command-line interface.
//!
//! Subcommands:
//! - `extract`: structural model of HDL files as JSON
//! - `lint`: syntax and lint findings
//! - `estimate`: resource, timing, power and thermal estimates for a component
//! - `advise`: ranked optimization candidates for a component
//! - `analyze`: the full analysis report for HDL files
//! - `devices`: the built-in device and architecture catalogs

#![warn(missing_docs)]

mod analyze;
mod devices;
mod estimate;
mod extract;
mod lint;
mod logging;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use hdlscope_arch::{Architecture, ComponentKind, SpeedGrade};
use hdlscope_common::Frequency;

/// Structural analysis, linting and estimation for Verilog sources.
#[derive(Parser, Debug)]
#[command(name = "hdlscope", version, about = "HDL structural analysis and estimation")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color output mode.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Path to `hdlscope.toml` or a directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract the structural design model as JSON.
    Extract(ExtractArgs),
    /// Run syntax checks and lint rules.
    Lint(LintArgs),
    /// Estimate one datapath component.
    Estimate(EstimateArgs),
    /// Rank alternatives for one datapath component.
    Advise(EstimateArgs),
    /// Run the full analysis and print the report as JSON.
    Analyze(AnalyzeArgs),
    /// List built-in devices and architectures.
    Devices,
}

/// Arguments for `hdlscope extract`.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Verilog source files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `hdlscope lint`.
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Verilog source files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Rules to suppress (can be repeated).
    #[arg(long, num_args = 1..)]
    pub allow: Vec<String>,

    /// Rules to promote to errors (can be repeated).
    #[arg(long, num_args = 1..)]
    pub deny: Vec<String>,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,
}

/// Arguments shared by `hdlscope estimate` and `hdlscope advise`.
#[derive(Parser, Debug)]
pub struct EstimateArgs {
    /// Component kind: adder, multiplier, fifo, counter or comparator.
    #[arg(long)]
    pub component: ComponentKind,

    /// Implementation architecture; the generic model when omitted.
    #[arg(long)]
    pub arch: Option<Architecture>,

    /// Datapath width in bits.
    #[arg(long)]
    pub width: u32,

    /// Storage depth in entries (required for FIFOs).
    #[arg(long)]
    pub depth: Option<u32>,

    /// Number of identical instances.
    #[arg(long, default_value_t = 1)]
    pub instances: u32,

    /// Target device name or alias.
    #[arg(long)]
    pub device: Option<String>,

    /// Clock frequency, e.g. `200MHz` or `200`.
    #[arg(long)]
    pub frequency: Option<Frequency>,

    /// Ambient temperature in °C.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Core voltage in V.
    #[arg(long)]
    pub voltage: Option<f64>,

    /// Speed grade: fastest, mid or slowest.
    #[arg(long)]
    pub speed_grade: Option<SpeedGrade>,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,
}

/// Arguments for `hdlscope analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Verilog source files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON design intent naming the component to estimate.
    #[arg(long)]
    pub intent: Option<PathBuf>,
}

/// Output format for findings and estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// Global flags shared by every subcommand.
#[derive(Debug)]
pub struct GlobalArgs {
    /// Suppress non-error output.
    pub quiet: bool,
    /// Whether to emit ANSI colors.
    pub color: bool,
    /// Explicit configuration path.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        color: match cli.color {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        },
        config: cli.config,
    };

    let result = match cli.command {
        Command::Extract(args) => extract::run(&args, &global),
        Command::Lint(args) => lint::run(&args, &global),
        Command::Estimate(args) => estimate::run_estimate(&args, &global),
        Command::Advise(args) => estimate::run_advise(&args, &global),
        Command::Analyze(args) => analyze::run(&args, &global),
        Command::Devices => devices::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
