//! Simulated time and two-phase clock sequencing.
//!
//! [`SimClock`] owns the simulated-time counter: an unsigned 64-bit
//! timestep count, wide enough that wraparound is not feasible in any run.
//! Time only ever moves forward, one unit per half-cycle, so every trace
//! sample gets a unique timestamp by construction.

/// One phase of the two-phase clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockPhase {
    /// Clock signal driven high.
    High,
    /// Clock signal driven low.
    Low,
}

impl ClockPhase {
    /// Returns the opposite phase.
    pub fn invert(self) -> Self {
        match self {
            ClockPhase::High => ClockPhase::Low,
            ClockPhase::Low => ClockPhase::High,
        }
    }

    /// Returns true for the high phase.
    pub fn is_high(self) -> bool {
        matches!(self, ClockPhase::High)
    }
}

/// The simulated-time counter and half-cycle sequencer.
///
/// Runs start at time 0 in phase [`ClockPhase::High`]; two
/// [`advance_half_cycle`](SimClock::advance_half_cycle) calls make one full
/// clock period.
#[derive(Debug, Default)]
pub struct SimClock {
    time: u64,
}

impl SimClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self { time: 0 }
    }

    /// Returns the current simulated time in timesteps.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Advances one half-cycle: time moves forward by exactly one unit and
    /// the phase inverts. Pure sequencing, no failure modes.
    pub fn advance_half_cycle(&mut self, phase: ClockPhase) -> (u64, ClockPhase) {
        self.time += 1;
        (self.time, phase.invert())
    }
}
