//! Parsing and validation of `strobe.toml` harness configuration files.
//!
//! The configuration file selects the model, the trace destination and
//! format, and the run parameters (reset window, cycle cap). All sections
//! beyond `[harness]` are optional with sensible defaults, so the minimal
//! file is two lines.
//!
//! # Modules
//!
//! - `error` — Configuration error types
//! - `loader` — File reading and validation
//! - `types` — The deserialized configuration tree

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
