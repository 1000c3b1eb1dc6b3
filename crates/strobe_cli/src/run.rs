//! `strobe run` — drive a built-in model to completion.
//!
//! Merges the `strobe.toml` configuration with command-line overrides,
//! constructs the selected model, runs the cycle harness with waveform
//! recording, and prints a run report.

use std::path::{Path, PathBuf};

use strobe_config::{HarnessConfig, TraceFileFormat};
use strobe_dut::{CounterModel, BUILTIN_MODELS};
use strobe_harness::{RunOptions, DEFAULT_RESET_THRESHOLD};
use strobe_trace::TraceFormat;

use crate::{GlobalArgs, ReportFormat, RunArgs, TraceFormatArg};

/// Default halt edge count for the counter model when neither the CLI nor
/// the configuration file sets one.
const DEFAULT_HALT_AT: u64 = 16;

/// Runs the `strobe run` command.
///
/// Command-line flags override the configuration file, which overrides
/// built-in defaults. Returns exit code 0 when the run completes, whether
/// by DUT halt or by the cycle cap.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_merged_config(global)?;

    let model = args
        .model
        .as_deref()
        .or_else(|| config.as_ref().and_then(|c| c.harness.model.as_deref()))
        .unwrap_or("counter")
        .to_string();
    if !BUILTIN_MODELS.contains(&model.as_str()) {
        return Err(format!(
            "unknown model '{model}' (available: {})",
            BUILTIN_MODELS.join(", ")
        )
        .into());
    }

    let format = resolve_format(args, config.as_ref());
    let max_cycles = args
        .max_cycles
        .or_else(|| config.as_ref().and_then(|c| c.run.max_cycles));
    if model == "free-run" && max_cycles.is_none() {
        return Err("model 'free-run' never halts; set --max-cycles".into());
    }

    let dut = match model.as_str() {
        "counter" => CounterModel::new(Some(args.halt_at.unwrap_or(DEFAULT_HALT_AT))),
        _ => CounterModel::free_running(),
    };

    let trace_path = resolve_trace_path(args, config.as_ref(), &model, format)?;
    let options = RunOptions {
        trace_path: trace_path.clone(),
        format,
        scope: args
            .scope
            .as_deref()
            .or_else(|| config.as_ref().and_then(|c| c.trace.scope.as_deref()))
            .unwrap_or("top")
            .to_string(),
        reset_threshold: args
            .reset_threshold
            .or_else(|| config.as_ref().map(|c| c.run.reset_threshold))
            .unwrap_or(DEFAULT_RESET_THRESHOLD),
        max_cycles,
        trace_depth: args
            .depth
            .or_else(|| config.as_ref().and_then(|c| c.trace.depth)),
        stop: None,
    };

    if !global.quiet {
        eprintln!("   Running {model}");
        if global.verbose {
            eprintln!("   Reset threshold: {}", options.reset_threshold);
        }
    }

    let summary = strobe_harness::run(dut, &options)?;

    match args.report {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ReportFormat::Text => {
            if !global.quiet {
                let cause = if summary.halted { "halt" } else { "stop" };
                eprintln!(
                    "   Finished at t={} ({} cycles, {} samples, by {cause})",
                    summary.final_time, summary.cycles, summary.samples
                );
                eprintln!("   Waveform: {}", trace_path.display());
            }
        }
    }

    Ok(0)
}

/// Runs the `strobe models` command.
pub fn list_models(_global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    for name in BUILTIN_MODELS {
        println!("{name}");
    }
    Ok(0)
}

/// Loads the configuration file if one is present.
///
/// An explicit `--config` path must exist; otherwise `strobe.toml` in the
/// current directory is used when present, and its absence is not an
/// error.
fn load_merged_config(
    global: &GlobalArgs,
) -> Result<Option<HarnessConfig>, Box<dyn std::error::Error>> {
    if let Some(path) = &global.config {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config '{path}': {e}"))?;
        return Ok(Some(strobe_config::load_config_from_str(&content)?));
    }
    if Path::new("strobe.toml").is_file() {
        return Ok(Some(strobe_config::load_config(Path::new("."))?));
    }
    Ok(None)
}

fn resolve_format(args: &RunArgs, config: Option<&HarnessConfig>) -> TraceFormat {
    match args.format {
        Some(TraceFormatArg::Vcd) => TraceFormat::Vcd,
        Some(TraceFormatArg::VcdGz) => TraceFormat::VcdGz,
        None => match config.map(|c| c.trace.format) {
            Some(TraceFileFormat::VcdGz) => TraceFormat::VcdGz,
            _ => TraceFormat::Vcd,
        },
    }
}

/// Resolves the waveform destination path.
///
/// Precedence: `--output`, then `trace.path` from the configuration, then
/// `out/<name>.<ext>` (creating `out/` if needed).
fn resolve_trace_path(
    args: &RunArgs,
    config: Option<&HarnessConfig>,
    model: &str,
    format: TraceFormat,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(output) = &args.output {
        return Ok(PathBuf::from(output));
    }
    if let Some(path) = config.and_then(|c| c.trace.path.as_deref()) {
        return Ok(PathBuf::from(path));
    }
    let name = config.map(|c| c.harness.name.as_str()).unwrap_or(model);
    let out_dir = PathBuf::from("out");
    std::fs::create_dir_all(&out_dir)?;
    Ok(out_dir.join(format!("{name}.{}", format.extension())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run_args() -> RunArgs {
        RunArgs {
            model: None,
            halt_at: None,
            output: None,
            format: None,
            scope: None,
            reset_threshold: None,
            max_cycles: None,
            depth: None,
            report: ReportFormat::Text,
        }
    }

    fn quiet_global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn counter_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("counter.vcd");
        let mut args = run_args();
        args.model = Some("counter".to_string());
        args.halt_at = Some(3);
        args.reset_threshold = Some(2);
        args.output = Some(out.to_str().unwrap().to_string());

        let code = run(&args, &quiet_global()).unwrap();
        assert_eq!(code, 0);

        let content = fs::read_to_string(&out).unwrap();
        assert!(content.contains("$enddefinitions $end"));
        assert!(content.contains("$scope module top $end"));
    }

    #[test]
    fn config_file_supplies_defaults() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("from_config.vcd");
        let config_path = tmp.path().join("strobe.toml");
        fs::write(
            &config_path,
            format!(
                r#"
[harness]
name = "cfg_tb"
model = "counter"

[trace]
path = "{}"
scope = "tb"

[run]
reset_threshold = 2
"#,
                out.to_str().unwrap()
            ),
        )
        .unwrap();

        let args = run_args();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(config_path.to_str().unwrap().to_string()),
        };
        let code = run(&args, &global).unwrap();
        assert_eq!(code, 0);

        let content = fs::read_to_string(&out).unwrap();
        assert!(content.contains("$scope module tb $end"));
    }

    #[test]
    fn free_run_requires_max_cycles() {
        let mut args = run_args();
        args.model = Some("free-run".to_string());
        let err = run(&args, &quiet_global()).unwrap_err();
        assert!(err.to_string().contains("never halts"));
    }

    #[test]
    fn free_run_with_cap_completes() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("free.vcd");
        let mut args = run_args();
        args.model = Some("free-run".to_string());
        args.max_cycles = Some(10);
        args.reset_threshold = Some(2);
        args.output = Some(out.to_str().unwrap().to_string());

        let code = run(&args, &quiet_global()).unwrap();
        assert_eq!(code, 0);
        assert!(out.is_file());
    }

    #[test]
    fn unknown_model_errors() {
        let mut args = run_args();
        args.model = Some("quantum".to_string());
        let err = run(&args, &quiet_global()).unwrap_err();
        assert!(err.to_string().contains("unknown model"));
    }

    #[test]
    fn missing_config_file_errors() {
        let args = run_args();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some("/nonexistent/strobe.toml".to_string()),
        };
        let err = run(&args, &global).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }

    #[test]
    fn gz_output_written() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("counter.vcd.gz");
        let mut args = run_args();
        args.halt_at = Some(3);
        args.reset_threshold = Some(2);
        args.format = Some(TraceFormatArg::VcdGz);
        args.output = Some(out.to_str().unwrap().to_string());

        run(&args, &quiet_global()).unwrap();
        let raw = fs::read(&out).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn format_resolution_precedence() {
        let mut args = run_args();
        assert_eq!(resolve_format(&args, None), TraceFormat::Vcd);
        args.format = Some(TraceFormatArg::VcdGz);
        assert_eq!(resolve_format(&args, None), TraceFormat::VcdGz);

        let config = strobe_config::load_config_from_str(
            "[harness]\nname = \"t\"\n\n[trace]\nformat = \"vcd-gz\"",
        )
        .unwrap();
        args.format = None;
        assert_eq!(resolve_format(&args, Some(&config)), TraceFormat::VcdGz);
    }

    #[test]
    fn explicit_output_wins_over_config() {
        let config = strobe_config::load_config_from_str(
            "[harness]\nname = \"t\"\n\n[trace]\npath = \"cfg.vcd\"",
        )
        .unwrap();
        let mut args = run_args();
        args.output = Some("cli.vcd".to_string());
        let path = resolve_trace_path(&args, Some(&config), "counter", TraceFormat::Vcd).unwrap();
        assert_eq!(path, PathBuf::from("cli.vcd"));

        args.output = None;
        let path = resolve_trace_path(&args, Some(&config), "counter", TraceFormat::Vcd).unwrap();
        assert_eq!(path, PathBuf::from("cfg.vcd"));
    }

    #[test]
    fn list_models_succeeds() {
        let code = list_models(&quiet_global()).unwrap();
        assert_eq!(code, 0);
    }
}
