//! Cycle-accurate test harness for clocked DUT models.
//!
//! Given a [`Dut`](strobe_dut::Dut) implementation, the harness toggles
//! its clock, holds reset through a configurable startup window, evaluates
//! the model twice per cycle, and records a waveform trace sample after
//! every evaluation. The run ends when the model raises its `halt` output
//! or an external stop fires; teardown always closes the trace before
//! finalizing the model.
//!
//! # Modules
//!
//! - `clock` — Simulated time and clock phase sequencing
//! - `driver` — The [`CycleDriver`] run loop and teardown
//! - `error` — Harness error types
//!
//! The one-call entry point is [`run`]:
//!
//! ```no_run
//! use strobe_dut::CounterModel;
//! use strobe_harness::{run, RunOptions};
//!
//! let dut = CounterModel::new(Some(100));
//! let summary = run(dut, &RunOptions::default())?;
//! assert!(summary.halted);
//! # Ok::<(), strobe_harness::HarnessError>(())
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod driver;
pub mod error;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use strobe_dut::Dut;
use strobe_trace::TraceFormat;

pub use clock::{ClockPhase, SimClock};
pub use driver::{CycleDriver, DriverState, RunSummary};
pub use error::HarnessError;

/// Default reset window: reset stays asserted while time <= this value.
pub const DEFAULT_RESET_THRESHOLD: u64 = 10;

/// Options for a harness run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Destination path for the waveform trace.
    pub trace_path: PathBuf,
    /// Trace output format.
    pub format: TraceFormat,
    /// Top-level scope name in the trace.
    pub scope: String,
    /// Reset is asserted while simulated time <= this threshold.
    pub reset_threshold: u64,
    /// Optional cap on full clock cycles; `None` runs until halt or stop.
    pub max_cycles: Option<u64>,
    /// Optional limit on waveform scope nesting depth.
    pub trace_depth: Option<u32>,
    /// Optional external stop flag, polled once per full cycle.
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("dump.vcd"),
            format: TraceFormat::Vcd,
            scope: "top".to_string(),
            reset_threshold: DEFAULT_RESET_THRESHOLD,
            max_cycles: None,
            trace_depth: None,
            stop: None,
        }
    }
}

/// Runs a DUT to completion with a file-backed trace.
///
/// Creates the trace destination, drives the model until it halts (or an
/// external stop fires), tears down, and returns the run summary. Trace
/// creation failure is fatal before any simulation occurs.
pub fn run<D: Dut>(dut: D, options: &RunOptions) -> Result<RunSummary, HarnessError> {
    let tracer = strobe_trace::create_tracer(&options.trace_path, options.format, options.trace_depth)?;
    let mut driver = CycleDriver::new(dut, tracer, &options.scope, options.reset_threshold)?;
    if let Some(limit) = options.max_cycles {
        driver.set_max_cycles(limit);
    }
    if let Some(stop) = &options.stop {
        driver.set_stop_flag(stop.clone());
    }
    driver.run()
}
