//! Harness error types.
//!
//! All of these are fatal: the cycle driver is a deterministic single-pass
//! batch driver with no retry semantics. Errors raised before the run loop
//! starts leave nothing behind that scoped ownership does not clean up.

use strobe_dut::DutError;
use strobe_trace::TraceError;

/// Errors that can occur during harness setup or a run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The DUT does not expose a required single-bit port.
    #[error("DUT has no single-bit {dir} port '{name}'")]
    MissingPort {
        /// The required port name.
        name: &'static str,
        /// The required direction ("input" or "output").
        dir: &'static str,
    },

    /// A trace recorder operation failed.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// A DUT port access failed.
    #[error("DUT port error: {0}")]
    Dut(#[from] DutError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_port_display() {
        let e = HarnessError::MissingPort {
            name: "halt",
            dir: "output",
        };
        assert_eq!(e.to_string(), "DUT has no single-bit output port 'halt'");
    }

    #[test]
    fn trace_error_wraps() {
        let e = HarnessError::from(TraceError::NotOpen);
        assert_eq!(e.to_string(), "trace error: recorder is not open");
    }

    #[test]
    fn dut_error_wraps() {
        let e = HarnessError::from(DutError::UnknownPort(2));
        assert_eq!(e.to_string(), "DUT port error: unknown port id 2");
    }
}
