//! Configuration types deserialized from `strobe.toml`.

use serde::Deserialize;

/// The top-level harness configuration parsed from `strobe.toml`.
#[derive(Debug, Deserialize)]
pub struct HarnessConfig {
    /// Core harness metadata (name, model selection).
    pub harness: HarnessMeta,
    /// Trace output settings.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Run loop settings (reset window, cycle cap).
    #[serde(default)]
    pub run: RunConfig,
}

/// Core harness metadata required in every `strobe.toml`.
#[derive(Debug, Deserialize)]
pub struct HarnessMeta {
    /// The harness name, used for default output file naming.
    pub name: String,
    /// The built-in model to drive (e.g. "counter", "free-run").
    #[serde(default)]
    pub model: Option<String>,
}

/// Trace output settings.
#[derive(Debug, Default, Deserialize)]
pub struct TraceConfig {
    /// Destination path for the trace file. Defaults to
    /// `out/<name>.<ext>` when unset.
    #[serde(default)]
    pub path: Option<String>,
    /// The trace file format.
    #[serde(default)]
    pub format: TraceFileFormat,
    /// Top-level scope name in the trace. Defaults to "top".
    #[serde(default)]
    pub scope: Option<String>,
    /// Maximum waveform scope nesting depth; unset means unlimited.
    #[serde(default)]
    pub depth: Option<u32>,
}

/// Trace file format selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TraceFileFormat {
    /// Value Change Dump (IEEE 1364, default).
    #[default]
    Vcd,
    /// VCD through a gzip encoder.
    VcdGz,
}

/// Run loop settings.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Reset stays asserted while simulated time <= this threshold.
    #[serde(default = "default_reset_threshold")]
    pub reset_threshold: u64,
    /// Optional cap on full clock cycles.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            reset_threshold: default_reset_threshold(),
            max_cycles: None,
        }
    }
}

fn default_reset_threshold() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn trace_format_all_variants() {
        for (input, expected) in [("vcd", TraceFileFormat::Vcd), ("vcd-gz", TraceFileFormat::VcdGz)]
        {
            let toml = format!(
                r#"
[harness]
name = "test"

[trace]
format = "{input}"
"#
            );
            let config = load_config_from_str(&toml).unwrap();
            assert_eq!(config.trace.format, expected);
        }
    }

    #[test]
    fn run_config_defaults() {
        let run = RunConfig::default();
        assert_eq!(run.reset_threshold, 10);
        assert!(run.max_cycles.is_none());
    }
}
