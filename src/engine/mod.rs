//! Shared time-stepping machinery.
//!
//! Every scenario runs on the same fixed step and gravitational constant,
//! and records energy into the same bounded sample buffer:
//! - [`clock`]: nanosecond-exact fixed-step clock
//! - [`buffer`]: generic rolling buffer with FIFO eviction
//! - [`energy`]: energy samples produced once per tick
//! - [`jidoka`]: stop-on-anomaly guard for non-finite state

pub mod buffer;
pub mod clock;
pub mod energy;
pub mod jidoka;

use serde::{Deserialize, Serialize};

pub use buffer::RollingBuffer;
pub use clock::SimClock;
pub use energy::EnergySample;
pub use jidoka::JidokaGuard;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.8;

/// Fixed integration step (s). Roughly one display frame at 60 Hz.
pub const TIMESTEP: f64 = 0.016;

/// [`TIMESTEP`] in nanoseconds.
pub const TIMESTEP_NANOS: u64 = 16_000_000;

/// Simulation time representation.
///
/// Fixed-point nanoseconds from scenario reset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SimTime {
    /// Time in nanoseconds from simulation start.
    nanos: u64,
}

impl SimTime {
    /// Zero time (scenario reset).
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create time from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Get time as seconds (f64).
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Get time as nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_constants_agree() {
        assert!((TIMESTEP_NANOS as f64 / 1e9 - TIMESTEP).abs() < 1e-15);
    }

    #[test]
    fn test_sim_time_from_nanos() {
        let t = SimTime::from_nanos(100 * TIMESTEP_NANOS);
        assert_eq!(t.as_nanos(), 1_600_000_000);
        assert!((t.as_secs_f64() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_sim_time_ordering() {
        assert!(SimTime::from_nanos(2) > SimTime::from_nanos(1));
        assert_eq!(SimTime::default(), SimTime::ZERO);
    }

    #[test]
    fn test_sim_time_display() {
        assert_eq!(SimTime::from_nanos(10 * TIMESTEP_NANOS).to_string(), "0.160s");
    }
}
