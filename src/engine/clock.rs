//! Simulation clock management.
//!
//! Time is kept as whole nanoseconds so that the timestamp of step `n` is
//! exactly `n · dt`, however many ticks have run.

use serde::{Deserialize, Serialize};

use crate::engine::{SimTime, TIMESTEP_NANOS};

/// Simulation clock.
///
/// Manages fixed-step time progression for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    /// Current simulation time.
    current: SimTime,
    /// Timestep duration in nanoseconds.
    timestep_nanos: u64,
    /// Number of steps taken.
    step_count: u64,
}

impl SimClock {
    /// Create a new clock with timestep in nanoseconds.
    #[must_use]
    pub const fn from_nanos(timestep_nanos: u64) -> Self {
        Self {
            current: SimTime::ZERO,
            timestep_nanos,
            step_count: 0,
        }
    }

    /// Get current simulation time.
    #[must_use]
    pub const fn current_time(&self) -> SimTime {
        self.current
    }

    /// Get timestep duration as seconds.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.timestep_nanos as f64 / 1_000_000_000.0
    }

    /// Get number of steps taken.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Advance clock by one timestep.
    ///
    /// Returns the new time.
    #[allow(clippy::missing_const_for_fn)]
    pub fn tick(&mut self) -> SimTime {
        self.step_count += 1;
        self.current = SimTime::from_nanos(self.step_count * self.timestep_nanos);
        self.current
    }

    /// Reset clock to time zero.
    #[allow(clippy::missing_const_for_fn)]
    pub fn reset(&mut self) {
        self.current = SimTime::ZERO;
        self.step_count = 0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::from_nanos(TIMESTEP_NANOS)
    }
}
