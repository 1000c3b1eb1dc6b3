//! The [`Dut`] trait: the seam between the cycle driver and a hardware model.
//!
//! A DUT is treated as a black box: the driver only sees the port list, the
//! port read/write operations, and `eval`/`finalize`. Port IDs are positions
//! in the list returned by [`Dut::ports`], fixed for the DUT's lifetime.

use crate::error::DutError;
use crate::port::{PortId, PortSpec, PortValue};

/// Name of the required clock input port.
pub const CLOCK_PORT: &str = "clock";
/// Name of the required reset input port.
pub const RESET_PORT: &str = "reset";
/// Name of the required halt output port.
pub const HALT_PORT: &str = "halt";

/// A clocked hardware model exposing named signal ports.
///
/// The harness expects at least the single-bit inputs [`CLOCK_PORT`] and
/// [`RESET_PORT`] and the single-bit output [`HALT_PORT`]. `eval` recomputes
/// all outputs from current inputs and internal state; `finalize` is called
/// exactly once at shutdown, after the waveform trace has been closed.
pub trait Dut {
    /// Returns the DUT's port list. Must not change for the DUT's lifetime.
    fn ports(&self) -> &[PortSpec];

    /// Drives an input port. Rejects outputs and mismatched widths.
    fn write(&mut self, port: PortId, value: PortValue) -> Result<(), DutError>;

    /// Reads the current value of any port (driven inputs or settled outputs).
    fn read(&self, port: PortId) -> Result<PortValue, DutError>;

    /// Recomputes all outputs from current inputs and internal state.
    fn eval(&mut self);

    /// Releases the model. Called exactly once by the driver at shutdown.
    fn finalize(&mut self);

    /// Finds a port by name.
    fn find_port(&self, name: &str) -> Option<PortId> {
        self.ports()
            .iter()
            .position(|p| p.name == name)
            .map(|i| PortId::from_raw(i as u32))
    }

    /// Reads every port in declaration order into `buf`.
    ///
    /// The buffer is cleared first; after a successful call it holds one
    /// value per port, forming the snapshot a trace sample records.
    fn snapshot(&self, buf: &mut Vec<PortValue>) -> Result<(), DutError> {
        buf.clear();
        for i in 0..self.ports().len() {
            buf.push(self.read(PortId::from_raw(i as u32))?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CounterModel;

    #[test]
    fn find_port_by_name() {
        let dut = CounterModel::new(Some(4));
        assert!(dut.find_port(CLOCK_PORT).is_some());
        assert!(dut.find_port(RESET_PORT).is_some());
        assert!(dut.find_port(HALT_PORT).is_some());
        assert!(dut.find_port("no_such_port").is_none());
    }

    #[test]
    fn snapshot_covers_all_ports() {
        let dut = CounterModel::new(Some(4));
        let mut buf = Vec::new();
        dut.snapshot(&mut buf).unwrap();
        assert_eq!(buf.len(), dut.ports().len());
    }

    #[test]
    fn snapshot_clears_previous_contents() {
        let dut = CounterModel::new(None);
        let mut buf = vec![PortValue::bit(true); 10];
        dut.snapshot(&mut buf).unwrap();
        assert_eq!(buf.len(), dut.ports().len());
    }
}
