//! Energy samples.

use serde::{Deserialize, Serialize};

use crate::engine::GRAVITY;

/// One point of the energy chart, taken after a tick.
///
/// All values in SI units (s, J).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    /// Scenario time of the sample.
    pub time: f64,
    /// Gravitational potential energy.
    pub potential_energy: f64,
    /// Kinetic energy.
    pub kinetic_energy: f64,
    /// `potential_energy + kinetic_energy`.
    pub total_energy: f64,
}

impl EnergySample {
    /// Build a sample; the total is always the sum of its parts.
    #[must_use]
    pub fn new(time: f64, potential_energy: f64, kinetic_energy: f64) -> Self {
        Self {
            time,
            potential_energy,
            kinetic_energy,
            total_energy: potential_energy + kinetic_energy,
        }
    }
}

/// `m·g·h`
#[must_use]
pub fn potential(mass: f64, height: f64) -> f64 {
    mass * GRAVITY * height
}

/// `½·m·v²`
#[must_use]
pub fn kinetic(mass: f64, speed: f64) -> f64 {
    0.5 * mass * speed * speed
}

/// Relative deviation of `current` from `reference`.
///
/// Falls back to the absolute deviation when the reference is ~0.
#[must_use]
pub fn relative_drift(current: f64, reference: f64) -> f64 {
    let diff = (current - reference).abs();
    if reference.abs() > f64::EPSILON {
        diff / reference.abs()
    } else {
        diff
    }
}
