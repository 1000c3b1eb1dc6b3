//! Device-under-test port interface for the strobe cycle harness.
//!
//! A DUT is an opaque clocked model exposing a fixed set of named signal
//! ports and an evaluation operation. The harness drives its `clock` and
//! `reset` inputs, calls [`Dut::eval`] to settle outputs, reads back the
//! full port snapshot for waveform recording, and watches the `halt` output
//! for completion.
//!
//! # Modules
//!
//! - `port` — Port descriptions and values (`PortSpec`, `PortValue`, `PortId`)
//! - `dut` — The [`Dut`] trait and required-port conventions
//! - `models` — Built-in software reference models
//! - `error` — DUT port access errors

#![warn(missing_docs)]

pub mod dut;
pub mod error;
pub mod models;
pub mod port;

pub use dut::{Dut, CLOCK_PORT, HALT_PORT, RESET_PORT};
pub use error::DutError;
pub use models::{CounterModel, BUILTIN_MODELS};
pub use port::{PortDir, PortId, PortSpec, PortValue};
