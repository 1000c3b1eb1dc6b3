//! Port descriptions and values.
//!
//! Every DUT exposes a flat, fixed list of ports. A [`PortId`] is an index
//! into that list, a [`PortSpec`] describes one port, and a [`PortValue`]
//! holds a port's current bits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a port by its position in the DUT's port list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(u32);

impl PortId {
    /// Creates a port ID from a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize` for slice access.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Direction of a port as seen from the DUT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDir {
    /// Driven by the harness.
    Input,
    /// Driven by the DUT's evaluation.
    Output,
}

/// Description of a single DUT port.
///
/// Port names may be hierarchical using `.` as a separator (e.g.
/// `core.count`); the trace recorder maps the dotted prefix to nested
/// waveform scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// The port name, possibly dotted for hierarchy.
    pub name: String,
    /// The port direction.
    pub dir: PortDir,
    /// Bit width, 1..=64.
    pub width: u32,
}

impl PortSpec {
    /// Creates an input port description.
    pub fn input(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            dir: PortDir::Input,
            width,
        }
    }

    /// Creates an output port description.
    pub fn output(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            dir: PortDir::Output,
            width,
        }
    }
}

/// The current value of a port: a bit pattern with an explicit width.
///
/// Bits above the width are always zero; constructors mask excess bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortValue {
    bits: u64,
    width: u32,
}

impl PortValue {
    /// Creates a value, masking any bits above `width`.
    pub fn new(bits: u64, width: u32) -> Self {
        Self {
            bits: bits & Self::mask(width),
            width,
        }
    }

    /// Creates a single-bit value.
    pub fn bit(high: bool) -> Self {
        Self {
            bits: high as u64,
            width: 1,
        }
    }

    /// Creates an all-zero value of the given width.
    pub fn zero(width: u32) -> Self {
        Self { bits: 0, width }
    }

    /// Returns the raw bits.
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// Returns the bit width.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns true if any bit is set. For single-bit ports this is the
    /// signal level.
    pub fn is_high(self) -> bool {
        self.bits != 0
    }

    fn mask(width: u32) -> u64 {
        if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        }
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 1 {
            write!(f, "{}", self.bits)
        } else {
            write!(f, "{}'h{:x}", self.width, self.bits)
        }
    }
}
