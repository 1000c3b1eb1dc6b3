//! The [`TraceRecorder`] trait.

use strobe_dut::{PortSpec, PortValue};

use crate::error::TraceError;

/// Trait for appending time-ordered signal snapshots to a waveform log.
///
/// Implementations write a particular on-disk format (VCD text, compressed
/// VCD, etc.). The contract the cycle driver relies on:
///
/// - [`open`](TraceRecorder::open) must be called exactly once, before any
///   sample is recorded.
/// - [`record_sample`](TraceRecorder::record_sample) accepts strictly
///   increasing timestamps; anything else is rejected.
/// - [`close`](TraceRecorder::close) flushes and finalizes the output and is
///   idempotent.
pub trait TraceRecorder {
    /// Writes the format header and declares one signal per port, rooted in
    /// the named scope.
    fn open(&mut self, scope: &str, ports: &[PortSpec]) -> Result<(), TraceError>;

    /// Appends one sample: the full port snapshot at the given timestamp.
    ///
    /// The snapshot must hold exactly one value per declared port, in
    /// declaration order.
    fn record_sample(&mut self, time: u64, sample: &[PortValue]) -> Result<(), TraceError>;

    /// Flushes and finalizes the output. Safe to call more than once.
    fn close(&mut self) -> Result<(), TraceError>;
}

impl std::fmt::Debug for dyn TraceRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn TraceRecorder")
    }
}
