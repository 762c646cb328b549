//! Jidoka (自働化) - stop the line on a bad state.
//!
//! The integrators are total over finite input, but nothing stops a caller
//! from setting `length = 0` or a NaN mass. The guard runs after every tick
//! and reports the first non-finite state component so the scenario can be
//! stopped before garbage propagates into the chart.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

/// Jidoka guard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JidokaConfig {
    /// Check state components for NaN/Inf after each tick.
    pub check_finite: bool,
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self { check_finite: true }
    }
}

/// Stop-on-anomaly guard owned by one scenario.
#[derive(Debug, Clone, Default)]
pub struct JidokaGuard {
    config: JidokaConfig,
}

impl JidokaGuard {
    /// Create a guard.
    #[must_use]
    pub const fn new(config: JidokaConfig) -> Self {
        Self { config }
    }

    /// Check named state components.
    ///
    /// # Errors
    ///
    /// Returns `LabError::NonFinite` for the first NaN or infinite value.
    pub fn check(
        &self,
        scenario: &'static str,
        components: &[(&'static str, f64)],
    ) -> LabResult<()> {
        if !self.config.check_finite {
            return Ok(());
        }
        if let Some(&(component, value)) = components.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LabError::NonFinite {
                scenario,
                component,
                value,
            });
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any finite state passes.
        #[test]
        fn prop_finite_values_pass(a in -1e9f64..1e9, b in -1e9f64..1e9) {
            let guard = JidokaGuard::default();
            prop_assert!(guard.check("pendulum", &[("angle", a), ("angular_velocity", b)]).is_ok());
        }
    }
}
