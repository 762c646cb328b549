//! Bouncing ball.
//!
//! Vertical drop from `initial_height` with inelastic ground contact.
//! Velocity is signed with **up positive**: gravity subtracts `g·dt` each
//! step and height moves by `velocity·dt`. On contact the height is clamped
//! to zero and the velocity is reflected and scaled by the restitution
//! coefficient.
//!
//! Phases: Falling ⇄ Rising, switching at the apex and at each bounce.
//! Rest is terminal and only reachable from a bounce whose rebound speed is
//! below [`REST_SPEED`].

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{limits, HaltReason, Model, ScenarioKind, Simulator, Transition};
use crate::engine::energy::{kinetic, potential};
use crate::engine::GRAVITY;

/// Rebound speed (m/s) below which the ball is considered at rest.
pub const REST_SPEED: f64 = 0.5;

/// Bounce parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct BounceParams {
    /// Mass (kg).
    #[validate(range(min = limits::MASS.min, max = limits::MASS.max))]
    pub mass: f64,
    /// Drop height (m).
    #[validate(range(min = limits::INITIAL_HEIGHT.min, max = limits::INITIAL_HEIGHT.max))]
    pub initial_height: f64,
    /// Coefficient of restitution (fraction of impact speed kept).
    #[serde(alias = "bounce_coefficient")]
    #[validate(range(min = limits::RESTITUTION.min, max = limits::RESTITUTION.max))]
    pub restitution: f64,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            initial_height: 10.0,
            restitution: 0.8,
        }
    }
}

/// Motion phase of the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BouncePhase {
    /// Moving down (or hanging at the apex of the drop).
    Falling,
    /// Moving up after a bounce.
    Rising,
    /// On the ground with zero velocity. Terminal.
    Rest,
}

/// Bounce state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceState {
    /// Height above ground (m).
    pub y: f64,
    /// Vertical velocity (m/s, up positive).
    pub velocity: f64,
    /// Ground contacts since reset.
    pub bounces: u32,
}

impl BounceState {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BouncePhase {
        if self.velocity > 0.0 {
            BouncePhase::Rising
        } else if self.bounces > 0 && self.y <= 0.0 && self.velocity == 0.0 {
            BouncePhase::Rest
        } else {
            BouncePhase::Falling
        }
    }
}

/// Bounce model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounce;

impl Model for Bounce {
    type Params = BounceParams;
    type State = BounceState;

    const KIND: ScenarioKind = ScenarioKind::Bounce;
    const DEFAULT_CAPACITY: usize = 150;
    const PARAMETERS: &'static [&'static str] = &["mass", "initial_height", "restitution"];

    fn initial_state(params: &BounceParams) -> BounceState {
        BounceState {
            y: params.initial_height,
            velocity: 0.0,
            bounces: 0,
        }
    }

    fn integrate(params: &BounceParams, state: &mut BounceState, dt: f64) -> Transition {
        state.velocity -= GRAVITY * dt;
        state.y += state.velocity * dt;

        if state.y <= 0.0 {
            state.y = 0.0;
            state.velocity = -state.velocity * params.restitution;
            state.bounces += 1;

            if state.velocity.abs() < REST_SPEED {
                state.velocity = 0.0;
                return Transition::Halt(HaltReason::CameToRest);
            }
        }
        Transition::Continue
    }

    fn energy(params: &BounceParams, state: &BounceState) -> (f64, f64) {
        (
            potential(params.mass, state.y),
            kinetic(params.mass, state.velocity),
        )
    }

    fn parameter(params: &BounceParams, name: &str) -> Option<f64> {
        match name {
            "mass" => Some(params.mass),
            "initial_height" | "height" => Some(params.initial_height),
            "restitution" | "bounce_coefficient" => Some(params.restitution),
            _ => None,
        }
    }

    fn set_parameter(params: &mut BounceParams, name: &str, value: f64) -> bool {
        match name {
            "mass" => params.mass = value,
            "initial_height" | "height" => params.initial_height = value,
            "restitution" | "bounce_coefficient" => params.restitution = value,
            _ => return false,
        }
        true
    }

    fn components(state: &BounceState) -> Vec<(&'static str, f64)> {
        vec![("y", state.y), ("velocity", state.velocity)]
    }
}

/// Bounce scenario simulator.
pub type BounceSim = Simulator<Bounce>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TIMESTEP;

    /// Tick until rest (or the cap), collecting the apex height of every rebound.
    fn rebound_apexes(sim: &mut BounceSim, cap: u64) -> Vec<f64> {
        let mut apexes = Vec::new();
        let mut peak = 0.0_f64;
        let mut bounces = 0;
        sim.start();
        while sim.is_running() && sim.step_count() < cap {
            let result = sim.tick();
            let state = result.snapshot.state;
            if state.bounces != bounces {
                if bounces > 0 {
                    apexes.push(peak);
                }
                bounces = state.bounces;
                peak = 0.0;
            }
            peak = peak.max(state.y);
        }
        apexes
    }

    #[test]
    fn test_params_default_matches_lab_sliders() {
        let p = BounceParams::default();
        assert!((p.initial_height - 10.0).abs() < f64::EPSILON);
        assert!((p.restitution - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounce_coefficient_alias_in_yaml() {
        let p: BounceParams =
            serde_yaml::from_str("bounce_coefficient: 0.5").expect("deserialize");
        assert!((p.restitution - 0.5).abs() < f64::EPSILON);
        assert!((p.initial_height - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_falls_with_up_positive_velocity() {
        let params = BounceParams::default();
        let mut state = Bounce::initial_state(&params);
        Bounce::integrate(&params, &mut state, TIMESTEP);
        assert!((state.velocity + GRAVITY * TIMESTEP).abs() < 1e-12);
        assert!(state.y < params.initial_height);
        assert_eq!(state.phase(), BouncePhase::Falling);
    }

    #[test]
    fn test_ground_contact_reflects_and_damps() {
        let params = BounceParams::default();
        let mut state = BounceState {
            y: 0.01,
            velocity: -10.0,
            bounces: 0,
        };
        let t = Bounce::integrate(&params, &mut state, TIMESTEP);
        assert_eq!(t, Transition::Continue);
        assert!(state.y == 0.0);
        let impact = 10.0 + GRAVITY * TIMESTEP;
        assert!((state.velocity - impact * 0.8).abs() < 1e-12);
        assert_eq!(state.bounces, 1);
        assert_eq!(state.phase(), BouncePhase::Rising);
    }

    #[test]
    fn test_slow_rebound_comes_to_rest() {
        let params = BounceParams::default();
        let mut state = BounceState {
            y: 0.001,
            velocity: -0.4,
            bounces: 3,
        };
        let t = Bounce::integrate(&params, &mut state, TIMESTEP);
        assert_eq!(t, Transition::Halt(HaltReason::CameToRest));
        assert!(state.velocity == 0.0);
        assert_eq!(state.phase(), BouncePhase::Rest);
    }

    #[test]
    fn test_apex_heights_strictly_decrease() {
        let mut sim = BounceSim::new(BounceParams::default());
        let apexes = rebound_apexes(&mut sim, 20_000);
        assert!(apexes.len() >= 5, "apexes={apexes:?}");
        for pair in apexes.windows(2) {
            assert!(pair[1] < pair[0], "apexes={apexes:?}");
        }
        assert!(apexes[0] < 10.0);
    }

    #[test]
    fn test_reaches_rest_in_finite_ticks() {
        let mut sim = BounceSim::new(BounceParams::default());
        rebound_apexes(&mut sim, 20_000);
        assert!(!sim.is_running());
        assert_eq!(sim.last_halt(), Some(HaltReason::CameToRest));
        assert!(sim.step_count() < 20_000);
        let s = sim.state();
        assert!(s.y == 0.0 && s.velocity == 0.0);
        assert_eq!(s.phase(), BouncePhase::Rest);
    }

    #[test]
    fn test_zero_restitution_rests_on_first_contact() {
        let params = BounceParams {
            restitution: 0.0,
            ..Default::default()
        };
        let mut sim = BounceSim::new(params);
        sim.start();
        while sim.is_running() && sim.step_count() < 10_000 {
            sim.tick();
        }
        assert_eq!(sim.state().bounces, 1);
        assert_eq!(sim.last_halt(), Some(HaltReason::CameToRest));
    }

    #[test]
    fn test_buffer_capacity_is_150() {
        let mut sim = BounceSim::new(BounceParams {
            restitution: 1.0,
            ..Default::default()
        });
        sim.start();
        for _ in 0..400 {
            sim.tick();
        }
        assert_eq!(sim.samples().len(), 150);
    }
}
