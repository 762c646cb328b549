//! Frictionless incline.
//!
//! A point mass released at rest from `initial_height` slides down a fixed
//! slope under `a = g·sin α`. There is no rolling or moment of inertia; the
//! body is a sliding particle. The run ends the first tick the mass reaches
//! the ground, with `y` clamped to exactly zero.
//!
//! `slope_angle = 0` gives zero acceleration and the mass never moves; the
//! model is meant for `0 < α < π/2`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{limits, HaltReason, Model, ScenarioKind, Simulator, Transition};
use crate::engine::energy::{kinetic, potential};
use crate::engine::GRAVITY;

/// Incline parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct InclineParams {
    /// Mass (kg).
    #[validate(range(min = limits::MASS.min, max = limits::MASS.max))]
    pub mass: f64,
    /// Release height above ground (m).
    #[validate(range(min = limits::INITIAL_HEIGHT.min, max = limits::INITIAL_HEIGHT.max))]
    pub initial_height: f64,
    /// Slope angle from horizontal (rad).
    #[validate(range(min = limits::SLOPE_ANGLE.min, max = limits::SLOPE_ANGLE.max))]
    pub slope_angle: f64,
}

impl Default for InclineParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            initial_height: 5.0,
            slope_angle: 30f64.to_radians(),
        }
    }
}

impl InclineParams {
    /// Length of the slope surface from release point to ground.
    ///
    /// Infinite for a flat slope.
    #[must_use]
    pub fn slope_length(&self) -> f64 {
        self.initial_height / self.slope_angle.sin()
    }

    /// Horizontal run of the slope.
    #[must_use]
    pub fn slope_run(&self) -> f64 {
        self.slope_length() * self.slope_angle.cos()
    }

    /// Acceleration along the slope.
    #[must_use]
    pub fn acceleration(&self) -> f64 {
        GRAVITY * self.slope_angle.sin()
    }
}

/// Incline state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InclineState {
    /// Horizontal distance from release point (m).
    pub x: f64,
    /// Height above ground (m).
    pub y: f64,
    /// Speed along the slope (m/s).
    pub velocity: f64,
}

/// Incline model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Incline;

impl Model for Incline {
    type Params = InclineParams;
    type State = InclineState;

    const KIND: ScenarioKind = ScenarioKind::Incline;
    const DEFAULT_CAPACITY: usize = 100;
    const PARAMETERS: &'static [&'static str] = &["mass", "initial_height", "slope_angle"];

    fn initial_state(params: &InclineParams) -> InclineState {
        InclineState {
            x: 0.0,
            y: params.initial_height,
            velocity: 0.0,
        }
    }

    fn integrate(params: &InclineParams, state: &mut InclineState, dt: f64) -> Transition {
        let (sin, cos) = params.slope_angle.sin_cos();
        state.velocity += GRAVITY * sin * dt;

        let distance = state.velocity * dt;
        state.x += distance * cos;
        state.y -= distance * sin;

        if state.y <= 0.0 {
            state.y = 0.0;
            return Transition::Halt(HaltReason::ReachedGround);
        }
        Transition::Continue
    }

    fn energy(params: &InclineParams, state: &InclineState) -> (f64, f64) {
        (
            potential(params.mass, state.y),
            kinetic(params.mass, state.velocity),
        )
    }

    fn parameter(params: &InclineParams, name: &str) -> Option<f64> {
        match name {
            "mass" => Some(params.mass),
            "initial_height" | "height" => Some(params.initial_height),
            "slope_angle" | "angle" => Some(params.slope_angle),
            _ => None,
        }
    }

    fn set_parameter(params: &mut InclineParams, name: &str, value: f64) -> bool {
        match name {
            "mass" => params.mass = value,
            "initial_height" | "height" => params.initial_height = value,
            "slope_angle" | "angle" => params.slope_angle = value,
            _ => return false,
        }
        true
    }

    fn components(state: &InclineState) -> Vec<(&'static str, f64)> {
        vec![("x", state.x), ("y", state.y), ("velocity", state.velocity)]
    }
}

/// Incline scenario simulator.
pub type InclineSim = Simulator<Incline>;
