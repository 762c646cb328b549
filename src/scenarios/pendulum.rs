//! Simple pendulum.
//!
//! A point mass on a massless rod, integrated with the exact nonlinear
//! equation `θ'' = -(g/L)·sin θ` (no small-angle approximation).
//!
//! The step is semi-implicit Euler: angular velocity first, then the angle
//! from the *updated* velocity. Swapping the order turns it into explicit
//! Euler, which pumps energy into the swing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{limits, Model, ScenarioKind, Simulator, Transition};
use crate::engine::energy::{kinetic, potential};
use crate::engine::GRAVITY;

/// Pendulum parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PendulumParams {
    /// Mass of bob (kg).
    #[validate(range(min = limits::MASS.min, max = limits::MASS.max))]
    pub mass: f64,
    /// Length of rod (m).
    #[validate(range(min = limits::LENGTH.min, max = limits::LENGTH.max))]
    pub length: f64,
    /// Release angle from vertical (rad).
    #[validate(range(min = limits::INITIAL_ANGLE.min, max = limits::INITIAL_ANGLE.max))]
    pub initial_angle: f64,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            length: 2.0,
            initial_angle: 60f64.to_radians(),
        }
    }
}

impl PendulumParams {
    /// Horizontal release, strongly nonlinear.
    #[must_use]
    pub fn large_angle() -> Self {
        Self {
            initial_angle: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        }
    }
}

/// Pendulum state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angle from vertical (rad, 0 = hanging straight down).
    pub angle: f64,
    /// Angular velocity (rad/s).
    pub angular_velocity: f64,
}

impl PendulumState {
    /// Height of the bob above its lowest point.
    #[must_use]
    pub fn height(&self, length: f64) -> f64 {
        length * (1.0 - self.angle.cos())
    }

    /// Bob position relative to the pivot, y pointing up.
    #[must_use]
    pub fn bob_position(&self, length: f64) -> (f64, f64) {
        (length * self.angle.sin(), -length * self.angle.cos())
    }

    /// Tangential speed of the bob.
    #[must_use]
    pub fn speed(&self, length: f64) -> f64 {
        length * self.angular_velocity.abs()
    }
}

/// Pendulum model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pendulum;

impl Model for Pendulum {
    type Params = PendulumParams;
    type State = PendulumState;

    const KIND: ScenarioKind = ScenarioKind::Pendulum;
    const DEFAULT_CAPACITY: usize = 100;
    const PARAMETERS: &'static [&'static str] = &["mass", "length", "initial_angle"];

    fn initial_state(params: &PendulumParams) -> PendulumState {
        PendulumState {
            angle: params.initial_angle,
            angular_velocity: 0.0,
        }
    }

    fn integrate(params: &PendulumParams, state: &mut PendulumState, dt: f64) -> Transition {
        let angular_acceleration = -(GRAVITY / params.length) * state.angle.sin();
        state.angular_velocity += angular_acceleration * dt;
        state.angle += state.angular_velocity * dt;
        Transition::Continue
    }

    fn energy(params: &PendulumParams, state: &PendulumState) -> (f64, f64) {
        (
            potential(params.mass, state.height(params.length)),
            kinetic(params.mass, state.speed(params.length)),
        )
    }

    fn parameter(params: &PendulumParams, name: &str) -> Option<f64> {
        match name {
            "mass" => Some(params.mass),
            "length" => Some(params.length),
            "initial_angle" | "angle" => Some(params.initial_angle),
            _ => None,
        }
    }

    fn set_parameter(params: &mut PendulumParams, name: &str, value: f64) -> bool {
        match name {
            "mass" => params.mass = value,
            "length" => params.length = value,
            "initial_angle" | "angle" => params.initial_angle = value,
            _ => return false,
        }
        true
    }

    fn components(state: &PendulumState) -> Vec<(&'static str, f64)> {
        vec![
            ("angle", state.angle),
            ("angular_velocity", state.angular_velocity),
        ]
    }
}

/// Pendulum scenario simulator.
pub type PendulumSim = Simulator<Pendulum>;


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Total energy stays within 5% of its release value over 1000 ticks.
        #[test]
        fn prop_energy_drift_bounded(
            mass in 0.1f64..10.0,
            length in 1.0f64..3.0,
            angle in 0.1f64..2.0,
        ) {
            let mut sim = PendulumSim::new(PendulumParams { mass, length, initial_angle: angle });
            sim.start();
            for _ in 0..1000 {
                sim.tick();
            }
            prop_assert!(sim.max_energy_drift() < 0.05, "drift={}", sim.max_energy_drift());
        }
    }
}
