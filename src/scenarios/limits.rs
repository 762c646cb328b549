//! Parameter limits.
//!
//! One table for both config validation (`#[validate(range)]` on the
//! parameter structs) and the TUI sliders. The simulators themselves accept
//! any value.

use std::f64::consts::PI;

const DEGREE: f64 = PI / 180.0;

/// Inclusive limits and slider increment for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
    /// Slider increment.
    pub step: f64,
}

impl ParamRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Move `value` by `steps` increments, clamped to the limits.
    #[must_use]
    pub fn nudge(&self, value: f64, steps: f64) -> f64 {
        (value + steps * self.step).clamp(self.min, self.max)
    }
}

/// Mass of any body (kg).
pub const MASS: ParamRange = ParamRange::new(0.1, 10.0, 0.1);
/// Pendulum rod length (m).
pub const LENGTH: ParamRange = ParamRange::new(0.5, 5.0, 0.1);
/// Pendulum release angle (rad), 5° to 170°.
pub const INITIAL_ANGLE: ParamRange = ParamRange::new(5.0 * DEGREE, 170.0 * DEGREE, 5.0 * DEGREE);
/// Release height (m).
pub const INITIAL_HEIGHT: ParamRange = ParamRange::new(0.5, 20.0, 0.5);
/// Incline angle (rad), 5° to 85°.
pub const SLOPE_ANGLE: ParamRange = ParamRange::new(5.0 * DEGREE, 85.0 * DEGREE, 5.0 * DEGREE);
/// Coefficient of restitution.
pub const RESTITUTION: ParamRange = ParamRange::new(0.0, 1.0, 0.05);

/// Limits for a canonical parameter name.
#[must_use]
pub fn for_parameter(name: &str) -> Option<ParamRange> {
    match name {
        "mass" => Some(MASS),
        "length" => Some(LENGTH),
        "initial_angle" => Some(INITIAL_ANGLE),
        "initial_height" => Some(INITIAL_HEIGHT),
        "slope_angle" => Some(SLOPE_ANGLE),
        "restitution" => Some(RESTITUTION),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{Bounce, Incline, Model, Pendulum};

    #[test]
    fn test_every_parameter_has_limits() {
        for name in Pendulum::PARAMETERS
            .iter()
            .chain(Incline::PARAMETERS)
            .chain(Bounce::PARAMETERS)
        {
            let range = for_parameter(name).expect("limits for every parameter");
            assert!(range.min < range.max, "{name}");
            assert!(range.step > 0.0, "{name}");
        }
        assert!(for_parameter("damping").is_none());
    }

    #[test]
    fn test_slope_limits_stay_inside_open_quarter_turn() {
        assert!(SLOPE_ANGLE.min > 0.0);
        assert!(SLOPE_ANGLE.max < std::f64::consts::FRAC_PI_2);
        assert!(INITIAL_ANGLE.max < PI);
    }

    #[test]
    fn test_nudge_clamps() {
        assert!((MASS.nudge(1.0, 1.0) - 1.1).abs() < 1e-12);
        assert!((MASS.nudge(0.1, -1.0) - 0.1).abs() < f64::EPSILON);
        assert!((RESTITUTION.nudge(0.98, 1.0) - 1.0).abs() < f64::EPSILON);
    }
}
