//! Built-in software reference models.
//!
//! These stand in for generated hardware models so the harness can be
//! exercised without an external simulator. [`CounterModel`] is a clocked
//! 8-bit counter that raises `halt` after a configurable number of cycles,
//! or never, for runaway-simulation testing.

use crate::dut::{Dut, CLOCK_PORT, HALT_PORT, RESET_PORT};
use crate::error::DutError;
use crate::port::{PortDir, PortId, PortSpec, PortValue};

/// Names of the models the CLI can construct.
pub const BUILTIN_MODELS: &[&str] = &["counter", "free-run"];

/// A clocked counter model.
///
/// Ports: `clock` (in), `reset` (in), `halt` (out), `core.count` (out, 8
/// bits). While reset is asserted the counter holds at zero; afterwards it
/// increments on every rising clock edge. When `halt_at` is set, `halt`
/// goes high once that many edges have been counted.
pub struct CounterModel {
    ports: Vec<PortSpec>,
    clock: bool,
    reset: bool,
    prev_clock: bool,
    count: u64,
    halt: bool,
    halt_at: Option<u64>,
}

impl CounterModel {
    /// Creates a counter that halts after `halt_at` counted edges, or runs
    /// forever when `None`.
    pub fn new(halt_at: Option<u64>) -> Self {
        Self {
            ports: vec![
                PortSpec::input(CLOCK_PORT, 1),
                PortSpec::input(RESET_PORT, 1),
                PortSpec::output(HALT_PORT, 1),
                PortSpec::output("core.count", 8),
            ],
            clock: false,
            reset: false,
            prev_clock: false,
            count: 0,
            halt: false,
            halt_at,
        }
    }

    /// Creates a counter that never raises halt.
    pub fn free_running() -> Self {
        Self::new(None)
    }

    /// The number of rising edges counted since reset was last released.
    pub fn count(&self) -> u64 {
        self.count
    }

    fn spec(&self, port: PortId) -> Result<&PortSpec, DutError> {
        self.ports
            .get(port.index())
            .ok_or(DutError::UnknownPort(port.as_raw()))
    }
}

impl Dut for CounterModel {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }

    fn write(&mut self, port: PortId, value: PortValue) -> Result<(), DutError> {
        let spec = self.spec(port)?;
        if spec.dir != PortDir::Input {
            return Err(DutError::NotAnInput {
                name: spec.name.clone(),
            });
        }
        if spec.width != value.width() {
            return Err(DutError::WidthMismatch {
                name: spec.name.clone(),
                expected: spec.width,
                actual: value.width(),
            });
        }
        match port.index() {
            0 => self.clock = value.is_high(),
            1 => self.reset = value.is_high(),
            _ => unreachable!("only ports 0 and 1 are inputs"),
        }
        Ok(())
    }

    fn read(&self, port: PortId) -> Result<PortValue, DutError> {
        self.spec(port)?;
        Ok(match port.index() {
            0 => PortValue::bit(self.clock),
            1 => PortValue::bit(self.reset),
            2 => PortValue::bit(self.halt),
            _ => PortValue::new(self.count, 8),
        })
    }

    fn eval(&mut self) {
        if self.reset {
            self.count = 0;
            self.halt = false;
        } else if self.clock && !self.prev_clock {
            self.count += 1;
            if let Some(limit) = self.halt_at {
                if self.count >= limit {
                    self.halt = true;
                }
            }
        }
        self.prev_clock = self.clock;
    }

    fn finalize(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(dut: &CounterModel, name: &str) -> PortId {
        dut.find_port(name).unwrap()
    }

    fn pulse(dut: &mut CounterModel) {
        let clk = port(dut, CLOCK_PORT);
        dut.write(clk, PortValue::bit(true)).unwrap();
        dut.eval();
        dut.write(clk, PortValue::bit(false)).unwrap();
        dut.eval();
    }

    #[test]
    fn counts_rising_edges() {
        let mut dut = CounterModel::new(None);
        for _ in 0..5 {
            pulse(&mut dut);
        }
        assert_eq!(dut.count(), 5);
        let count_port = port(&dut, "core.count");
        assert_eq!(dut.read(count_port).unwrap().bits(), 5);
    }

    #[test]
    fn reset_holds_counter_at_zero() {
        let mut dut = CounterModel::new(None);
        let rst = port(&dut, RESET_PORT);
        dut.write(rst, PortValue::bit(true)).unwrap();
        for _ in 0..3 {
            pulse(&mut dut);
        }
        assert_eq!(dut.count(), 0);

        dut.write(rst, PortValue::bit(false)).unwrap();
        pulse(&mut dut);
        assert_eq!(dut.count(), 1);
    }

    #[test]
    fn halts_at_configured_edge() {
        let mut dut = CounterModel::new(Some(3));
        let halt = port(&dut, HALT_PORT);
        for _ in 0..2 {
            pulse(&mut dut);
        }
        assert!(!dut.read(halt).unwrap().is_high());
        pulse(&mut dut);
        assert!(dut.read(halt).unwrap().is_high());
    }

    #[test]
    fn free_running_never_halts() {
        let mut dut = CounterModel::free_running();
        let halt = port(&dut, HALT_PORT);
        for _ in 0..100 {
            pulse(&mut dut);
        }
        assert!(!dut.read(halt).unwrap().is_high());
    }

    #[test]
    fn no_edge_no_count() {
        let mut dut = CounterModel::new(None);
        let clk = port(&dut, CLOCK_PORT);
        dut.write(clk, PortValue::bit(true)).unwrap();
        dut.eval();
        // Held high: a second eval is not a new edge.
        dut.eval();
        assert_eq!(dut.count(), 1);
    }

    #[test]
    fn write_to_output_rejected() {
        let mut dut = CounterModel::new(None);
        let halt = port(&dut, HALT_PORT);
        let err = dut.write(halt, PortValue::bit(true)).unwrap_err();
        assert!(matches!(err, DutError::NotAnInput { .. }));
    }

    #[test]
    fn write_wrong_width_rejected() {
        let mut dut = CounterModel::new(None);
        let clk = port(&dut, CLOCK_PORT);
        let err = dut.write(clk, PortValue::new(1, 8)).unwrap_err();
        assert!(matches!(err, DutError::WidthMismatch { .. }));
    }

    #[test]
    fn unknown_port_rejected() {
        let dut = CounterModel::new(None);
        let err = dut.read(PortId::from_raw(99)).unwrap_err();
        assert!(matches!(err, DutError::UnknownPort(99)));
    }
}
