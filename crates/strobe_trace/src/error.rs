//! Trace recording error types.

use std::io;

/// Errors that can occur while recording a waveform trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// An I/O error occurred while writing trace data.
    #[error("trace I/O error: {0}")]
    Io(#[from] io::Error),

    /// A sample was recorded with a timestamp not after the previous one.
    #[error("non-monotonic timestamp {time} (last was {last})")]
    NonMonotonicTime {
        /// The rejected timestamp.
        time: u64,
        /// The most recently recorded timestamp.
        last: u64,
    },

    /// A sample's value count does not match the registered signal count.
    #[error("sample has {actual} values but {expected} signals are registered")]
    SampleArity {
        /// Number of registered signals.
        expected: usize,
        /// Number of values in the rejected sample.
        actual: usize,
    },

    /// A sample was recorded before the recorder was opened.
    #[error("recorder is not open")]
    NotOpen,

    /// The recorder was opened twice.
    #[error("recorder is already open")]
    AlreadyOpen,

    /// A sample was recorded after the recorder was closed.
    #[error("recorder is closed")]
    Closed,
}
