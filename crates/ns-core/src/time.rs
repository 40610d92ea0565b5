//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing integer `Tick` counter advanced by the
//! caller.  There is no wall-clock mapping: one tick is one discrete step of
//! the network (deliveries, passing, work).
//!
//! Durations such as a ramp's delivery interval or a worker's processing time
//! are [`TimeOffset`]s.  Elapsed time is counted inclusively, so the tick at
//! which an interval starts is its first tick:
//!
//!   elapsed(now, start) = now - start + 1

use std::fmt;

use crate::{CoreError, CoreResult, ElementId};

/// A duration measured in ticks (delivery interval, processing time).
pub type TimeOffset = u32;

/// Reject zero-length durations.  `what` names the node kind in the error.
pub fn positive_duration(
    what:     &'static str,
    id:       ElementId,
    duration: TimeOffset,
) -> CoreResult<TimeOffset> {
    if duration == 0 {
        return Err(CoreError::ZeroDuration { what, id });
    }
    Ok(duration)
}

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `start` to `self`, counting both ends.
    ///
    /// Returns 0 if `start` lies in the future.
    #[inline]
    pub fn elapsed_since(self, start: Tick) -> u64 {
        if self < start {
            0
        } else {
            self.0 - start.0 + 1
        }
    }

    /// `true` once an interval of `duration` ticks begun at `start` is
    /// complete at `self`.
    #[inline]
    pub fn has_elapsed(self, start: Tick, duration: TimeOffset) -> bool {
        self.elapsed_since(start) >= u64::from(duration)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The current tick of a run.  Cheap to copy; holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start: Tick) -> Self {
        Self { current_tick: start }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Built by the driver from command-line arguments (or deserialised with the
/// `serde` feature) and handed to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Tick number of the first simulated turn.  Reports traditionally
    /// number turns from 1.
    pub start_tick: Tick,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Seed for the routing probability source.  The same seed always
    /// produces identical runs.
    pub seed: u64,

    /// Emit a turn report every N ticks.  0 disables interval reports.
    pub report_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_tick:            Tick(1),
            total_ticks:           10,
            seed:                  0,
            report_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.start_tick.0 + self.total_ticks)
    }

    /// Sanity-check the configuration before a run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.start_tick.0.checked_add(self.total_ticks).is_none() {
            return Err(CoreError::Config(format!(
                "start tick {} + {} ticks overflows the tick counter",
                self.start_tick.0, self.total_ticks
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` positioned at `start_tick`.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_tick)
    }
}
