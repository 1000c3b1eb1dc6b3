//! Strobe CLI — the command-line interface for the strobe cycle harness.
//!
//! Provides `strobe run` for driving a built-in model to completion with
//! waveform recording, and `strobe models` for listing the models the CLI
//! can construct.

#![warn(missing_docs)]

mod run;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Strobe — a cycle-accurate testbench harness.
#[derive(Parser, Debug)]
#[command(name = "strobe", version, about = "Strobe cycle harness")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `strobe.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a model to completion, recording a waveform trace.
    Run(RunArgs),
    /// List the built-in models.
    Models,
}

/// Arguments for the `strobe run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Model name to run (see `strobe models`). Falls back to the
    /// configuration file, then to "counter".
    pub model: Option<String>,

    /// Halt after this many counted edges (counter model only).
    #[arg(long)]
    pub halt_at: Option<u64>,

    /// Output path for the waveform file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Waveform output format.
    #[arg(long, value_enum)]
    pub format: Option<TraceFormatArg>,

    /// Top-level scope name in the trace.
    #[arg(long)]
    pub scope: Option<String>,

    /// Hold reset while simulated time <= this threshold.
    #[arg(long)]
    pub reset_threshold: Option<u64>,

    /// Stop after this many full clock cycles.
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// Limit waveform scope nesting depth.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Output format for the run report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,
}

/// Waveform output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TraceFormatArg {
    /// Value Change Dump (IEEE 1364).
    Vcd,
    /// VCD through a gzip encoder.
    #[value(name = "vcd-gz")]
    VcdGz,
}

/// Run report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Models => run::list_models(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
