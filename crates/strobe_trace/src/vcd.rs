//! VCD (Value Change Dump) trace recorder following IEEE 1364.
//!
//! Produces human-readable text output: a header, a scope/variable
//! declaration section built from the DUT's (possibly dotted) port names,
//! then `#<time>` stamped value changes. The first sample dumps every
//! signal inside `$dumpvars`; subsequent samples emit only signals whose
//! value changed.

use std::io::Write;

use strobe_dut::{PortSpec, PortValue};

use crate::error::TraceError;
use crate::recorder::TraceRecorder;

/// VCD format recorder writing to any [`Write`] sink.
///
/// Signal identifiers use printable ASCII characters starting from `!`
/// (0x21). Dotted port names map to nested `$scope` levels; an optional
/// depth limit folds deeper components into the variable name.
pub struct VcdTracer<W: Write> {
    writer: W,
    ids: Vec<String>,
    widths: Vec<u32>,
    last: Vec<u64>,
    max_depth: Option<u32>,
    opened: bool,
    closed: bool,
    dumped: bool,
    last_time: Option<u64>,
}

impl<W: Write> VcdTracer<W> {
    /// Creates a VCD recorder with unlimited scope depth.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            ids: Vec::new(),
            widths: Vec::new(),
            last: Vec::new(),
            max_depth: None,
            opened: false,
            closed: false,
            dumped: false,
            last_time: None,
        }
    }

    /// Limits how many nested scopes are created below the root scope.
    ///
    /// With depth 0 all signals are declared flat under the root, keeping
    /// their full dotted names.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Generates a VCD identifier code from a sequential index.
    ///
    /// Uses printable ASCII characters starting from `!` (0x21);
    /// multi-character codes are generated for indices >= 94.
    fn make_id_code(index: u32) -> String {
        let mut result = String::new();
        let mut idx = index;
        loop {
            let c = (b'!' + (idx % 94) as u8) as char;
            result.push(c);
            idx /= 94;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
        result
    }

    fn write_header(&mut self) -> Result<(), TraceError> {
        writeln!(self.writer, "$date")?;
        writeln!(self.writer, "  Simulation date")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$version")?;
        writeln!(self.writer, "  strobe cycle harness")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$timescale")?;
        writeln!(self.writer, "  1ns")?;
        writeln!(self.writer, "$end")?;
        Ok(())
    }

    fn write_value(&mut self, index: usize, bits: u64) -> Result<(), TraceError> {
        let width = self.widths[index];
        let id = &self.ids[index];
        if width == 1 {
            writeln!(self.writer, "{bits}{id}")?;
        } else {
            writeln!(self.writer, "b{bits:0w$b} {id}", w = width as usize)?;
        }
        Ok(())
    }
}

impl<W: Write> TraceRecorder for VcdTracer<W> {
    fn open(&mut self, scope: &str, ports: &[PortSpec]) -> Result<(), TraceError> {
        if self.opened {
            return Err(TraceError::AlreadyOpen);
        }
        self.write_header()?;
        writeln!(self.writer, "$scope module {scope} $end")?;

        let depth_limit = self.max_depth.map(|d| d as usize).unwrap_or(usize::MAX);
        let mut stack: Vec<&str> = Vec::new();
        for (index, port) in ports.iter().enumerate() {
            let parts: Vec<&str> = port.name.split('.').collect();
            let scope_len = (parts.len() - 1).min(depth_limit);
            let (scopes, leaf_parts) = parts.split_at(scope_len);

            // Unwind to the common prefix, then descend.
            let common = stack
                .iter()
                .zip(scopes.iter())
                .take_while(|(a, b)| *a == *b)
                .count();
            while stack.len() > common {
                stack.pop();
                writeln!(self.writer, "$upscope $end")?;
            }
            for name in &scopes[common..] {
                stack.push(name);
                writeln!(self.writer, "$scope module {name} $end")?;
            }

            let leaf = leaf_parts.join(".");
            let id = Self::make_id_code(index as u32);
            writeln!(self.writer, "$var wire {} {id} {leaf} $end", port.width)?;
            self.ids.push(id);
            self.widths.push(port.width);
        }
        while stack.pop().is_some() {
            writeln!(self.writer, "$upscope $end")?;
        }
        writeln!(self.writer, "$upscope $end")?;
        writeln!(self.writer, "$enddefinitions $end")?;

        self.last = vec![0; ports.len()];
        self.opened = true;
        Ok(())
    }

    fn record_sample(&mut self, time: u64, sample: &[PortValue]) -> Result<(), TraceError> {
        if self.closed {
            return Err(TraceError::Closed);
        }
        if !self.opened {
            return Err(TraceError::NotOpen);
        }
        if sample.len() != self.ids.len() {
            return Err(TraceError::SampleArity {
                expected: self.ids.len(),
                actual: sample.len(),
            });
        }
        if let Some(last) = self.last_time {
            if time <= last {
                return Err(TraceError::NonMonotonicTime { time, last });
            }
        }

        writeln!(self.writer, "#{time}")?;
        if !self.dumped {
            writeln!(self.writer, "$dumpvars")?;
            for (index, value) in sample.iter().enumerate() {
                self.write_value(index, value.bits())?;
                self.last[index] = value.bits();
            }
            writeln!(self.writer, "$end")?;
            self.dumped = true;
        } else {
            for (index, value) in sample.iter().enumerate() {
                if value.bits() != self.last[index] {
                    self.write_value(index, value.bits())?;
                    self.last[index] = value.bits();
                }
            }
        }
        self.last_time = Some(time);
        Ok(())
    }

    fn close(&mut self) -> Result<(), TraceError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // For compressed sinks the trailer is written when the encoder drops.
        self.writer.flush()?;
        Ok(())
    }
}
