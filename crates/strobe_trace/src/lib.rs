//! Waveform trace recording for the strobe cycle harness.
//!
//! The [`TraceRecorder`] trait abstracts trace output; [`VcdTracer`]
//! implements the IEEE 1364 Value Change Dump format, viewable in GTKWave,
//! Surfer, or other waveform viewers. [`create_tracer`] builds a recorder
//! for a filesystem destination, optionally gzip-compressed.
//!
//! # Modules
//!
//! - `error` — Trace error types
//! - `recorder` — The [`TraceRecorder`] trait
//! - `vcd` — VCD text format implementation

#![warn(missing_docs)]

pub mod error;
pub mod recorder;
pub mod vcd;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

pub use error::TraceError;
pub use recorder::TraceRecorder;
pub use vcd::VcdTracer;

/// On-disk trace format selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// Plain VCD text (default).
    #[default]
    Vcd,
    /// VCD text through a gzip encoder.
    VcdGz,
}

impl TraceFormat {
    /// The conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            TraceFormat::Vcd => "vcd",
            TraceFormat::VcdGz => "vcd.gz",
        }
    }
}

/// Creates a trace recorder writing to the given path.
///
/// Fails if the destination file cannot be created. The recorder still
/// needs [`TraceRecorder::open`] before samples can be recorded; `max_depth`
/// limits waveform scope nesting as described on
/// [`VcdTracer::with_max_depth`].
pub fn create_tracer(
    path: &Path,
    format: TraceFormat,
    max_depth: Option<u32>,
) -> Result<Box<dyn TraceRecorder>, TraceError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let tracer: Box<dyn TraceRecorder> = match format {
        TraceFormat::Vcd => {
            let mut t = VcdTracer::new(writer);
            if let Some(depth) = max_depth {
                t = t.with_max_depth(depth);
            }
            Box::new(t)
        }
        TraceFormat::VcdGz => {
            let mut t = VcdTracer::new(GzEncoder::new(writer, Compression::default()));
            if let Some(depth) = max_depth {
                t = t.with_max_depth(depth);
            }
            Box::new(t)
        }
    };
    Ok(tracer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use strobe_dut::{PortSpec, PortValue};
    use tempfile::TempDir;

    fn ports() -> Vec<PortSpec> {
        vec![PortSpec::input("clock", 1), PortSpec::output("halt", 1)]
    }

    #[test]
    fn format_extensions() {
        assert_eq!(TraceFormat::Vcd.extension(), "vcd");
        assert_eq!(TraceFormat::VcdGz.extension(), "vcd.gz");
    }

    #[test]
    fn create_tracer_writes_vcd_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("run.vcd");
        let mut tracer = create_tracer(&path, TraceFormat::Vcd, None).unwrap();
        tracer.open("top", &ports()).unwrap();
        tracer
            .record_sample(0, &[PortValue::bit(true), PortValue::bit(false)])
            .unwrap();
        tracer.close().unwrap();
        drop(tracer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("$timescale"));
        assert!(content.contains("#0"));
    }

    #[test]
    fn create_tracer_gz_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("run.vcd.gz");
        let mut tracer = create_tracer(&path, TraceFormat::VcdGz, None).unwrap();
        tracer.open("top", &ports()).unwrap();
        tracer
            .record_sample(0, &[PortValue::bit(true), PortValue::bit(false)])
            .unwrap();
        tracer.close().unwrap();
        drop(tracer);

        let raw = std::fs::read(&path).unwrap();
        let mut decoder = flate2::read::GzDecoder::new(raw.as_slice());
        let mut content = String::new();
        decoder.read_to_string(&mut content).unwrap();
        assert!(content.contains("$timescale"));
        assert!(content.contains("$var wire 1 ! clock $end"));
    }

    #[test]
    fn create_tracer_invalid_destination_fails() {
        let err = create_tracer(
            Path::new("/nonexistent/dir/run.vcd"),
            TraceFormat::Vcd,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TraceError::Io(_)));
    }
}
