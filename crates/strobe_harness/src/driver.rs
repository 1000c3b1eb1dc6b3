//! The cycle driver: reset window, clock toggling, sampling, and teardown.
//!
//! [`CycleDriver`] owns the DUT and the trace recorder for the duration of
//! a run and is the sole writer of simulated time, clock phase, and DUT
//! inputs. Each full cycle drives the clock high then low, evaluating the
//! model and recording a trace sample after each half-cycle, so every
//! sample reflects settled outputs for its phase. The halt output and the
//! external stop flag are checked once per full cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use strobe_dut::{Dut, PortDir, PortId, PortValue, CLOCK_PORT, HALT_PORT, RESET_PORT};
use strobe_trace::TraceRecorder;

use crate::clock::{ClockPhase, SimClock};
use crate::error::HarnessError;

/// The driver's lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Iterating: clock toggling and sampling in progress.
    Running,
    /// Halt or stop observed; final resource release pending.
    Halting,
    /// Terminal. Repeated teardown calls are no-ops.
    Terminated,
}

/// The result of a completed (or stopped) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Simulated time when the run ended.
    pub final_time: u64,
    /// Full clock cycles executed.
    pub cycles: u64,
    /// Trace samples recorded.
    pub samples: u64,
    /// Whether the DUT raised its halt output.
    pub halted: bool,
    /// Whether an external stop (flag or cycle cap) ended the run.
    pub stopped: bool,
}

/// Drives a DUT through simulated time, recording a waveform trace.
///
/// Construction performs the init transition: required ports are resolved,
/// the trace recorder is opened, and reset is asserted. Either is fatal on
/// failure, before any simulation state is mutated. [`run`](Self::run)
/// executes to halt/stop and tears down; `Drop` performs the same teardown
/// best-effort so a forced early exit still closes the trace.
pub struct CycleDriver<D: Dut> {
    dut: D,
    tracer: Box<dyn TraceRecorder>,
    clock: SimClock,
    phase: ClockPhase,
    state: DriverState,
    reset_threshold: u64,
    max_cycles: Option<u64>,
    stop: Option<Arc<AtomicBool>>,
    clock_port: PortId,
    reset_port: PortId,
    halt_port: PortId,
    sample_buf: Vec<PortValue>,
    cycles: u64,
    samples: u64,
    halted: bool,
    stopped: bool,
}

impl<D: Dut> std::fmt::Debug for CycleDriver<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleDriver")
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .field("samples", &self.samples)
            .field("halted", &self.halted)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl<D: Dut> CycleDriver<D> {
    /// Creates a driver and performs the init transition.
    ///
    /// Resolves the required `clock`/`reset`/`halt` ports, opens the trace
    /// recorder under the given scope name, asserts reset, and enters
    /// [`DriverState::Running`] at time 0 in the high phase.
    pub fn new(
        mut dut: D,
        mut tracer: Box<dyn TraceRecorder>,
        scope: &str,
        reset_threshold: u64,
    ) -> Result<Self, HarnessError> {
        let clock_port = require_port(&dut, CLOCK_PORT, PortDir::Input)?;
        let reset_port = require_port(&dut, RESET_PORT, PortDir::Input)?;
        let halt_port = require_port(&dut, HALT_PORT, PortDir::Output)?;

        tracer.open(scope, dut.ports())?;
        dut.write(reset_port, PortValue::bit(true))?;

        let port_count = dut.ports().len();
        Ok(Self {
            dut,
            tracer,
            clock: SimClock::new(),
            phase: ClockPhase::High,
            state: DriverState::Running,
            reset_threshold,
            max_cycles: None,
            stop: None,
            clock_port,
            reset_port,
            halt_port,
            sample_buf: Vec::with_capacity(port_count),
            cycles: 0,
            samples: 0,
            halted: false,
            stopped: false,
        })
    }

    /// Caps the run at the given number of full cycles.
    ///
    /// The driver itself has no built-in iteration limit; a DUT that never
    /// halts runs until this cap or the stop flag fires.
    pub fn set_max_cycles(&mut self, limit: u64) {
        self.max_cycles = Some(limit);
    }

    /// Installs an external stop flag, checked once per full cycle and
    /// treated identically to the DUT's halt output.
    pub fn set_stop_flag(&mut self, stop: Arc<AtomicBool>) {
        self.stop = Some(stop);
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns the current simulated time.
    pub fn time(&self) -> u64 {
        self.clock.time()
    }

    /// Executes one full clock cycle: high half, low half, halt/stop check.
    ///
    /// A no-op unless the driver is [`DriverState::Running`].
    pub fn step_cycle(&mut self) -> Result<(), HarnessError> {
        if self.state != DriverState::Running {
            return Ok(());
        }

        self.drive_half_cycle()?;
        self.advance();
        self.drive_half_cycle()?;
        self.cycles += 1;

        let halt = self.dut.read(self.halt_port)?.is_high();
        let stop = self
            .stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let capped = self.max_cycles.is_some_and(|limit| self.cycles >= limit);
        if halt || stop || capped {
            // Transition without advancing further; the halting cycle's
            // samples are already recorded.
            self.halted = halt;
            self.stopped = !halt && (stop || capped);
            self.state = DriverState::Halting;
        } else {
            self.advance();
        }
        Ok(())
    }

    /// Runs until halt or stop, then tears down in order.
    pub fn run(&mut self) -> Result<RunSummary, HarnessError> {
        while self.state == DriverState::Running {
            self.step_cycle()?;
        }
        self.shutdown()?;
        Ok(self.summary())
    }

    /// Releases all driver-owned resources. Idempotent.
    ///
    /// The trace recorder is closed before the DUT is finalized, so the
    /// trace file is never left partially written relative to an already
    /// torn-down model.
    pub fn shutdown(&mut self) -> Result<(), HarnessError> {
        if self.state == DriverState::Terminated {
            return Ok(());
        }
        self.state = DriverState::Terminated;
        let closed = self.tracer.close();
        self.dut.finalize();
        closed?;
        Ok(())
    }

    /// Returns the summary of the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            final_time: self.clock.time(),
            cycles: self.cycles,
            samples: self.samples,
            halted: self.halted,
            stopped: self.stopped,
        }
    }

    /// Drives reset and clock for the current half-cycle, evaluates the
    /// DUT, and records the settled snapshot at the current time.
    fn drive_half_cycle(&mut self) -> Result<(), HarnessError> {
        let t = self.clock.time();
        // Reset is a non-increasing function of time: asserted up to and
        // including the threshold, deasserted permanently after.
        self.dut
            .write(self.reset_port, PortValue::bit(t <= self.reset_threshold))?;
        self.dut
            .write(self.clock_port, PortValue::bit(self.phase.is_high()))?;
        self.dut.eval();
        self.dut.snapshot(&mut self.sample_buf)?;
        self.tracer.record_sample(t, &self.sample_buf)?;
        self.samples += 1;
        Ok(())
    }

    fn advance(&mut self) {
        let (_, phase) = self.clock.advance_half_cycle(self.phase);
        self.phase = phase;
    }
}

impl<D: Dut> Drop for CycleDriver<D> {
    fn drop(&mut self) {
        // Forced interruption still closes the trace with all samples
        // emitted so far intact.
        let _ = self.shutdown();
    }
}

/// Resolves a required single-bit port of the given direction.
fn require_port<D: Dut>(
    dut: &D,
    name: &'static str,
    dir: PortDir,
) -> Result<PortId, HarnessError> {
    let dir_str = match dir {
        PortDir::Input => "input",
        PortDir::Output => "output",
    };
    let missing = HarnessError::MissingPort {
        name,
        dir: dir_str,
    };
    let Some(id) = dut.find_port(name) else {
        return Err(missing);
    };
    let spec = &dut.ports()[id.index()];
    if spec.dir != dir || spec.width != 1 {
        return Err(missing);
    }
    Ok(id)
}
