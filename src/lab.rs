//! Lab driver context.
//!
//! Owns one simulator per scenario and decides which of them advance on each
//! frame. Scenarios share no mutable state; a parameter change on one is
//! invisible to the others.

use serde::{Deserialize, Serialize};

use crate::config::LabConfig;
use crate::scenarios::{
    BounceSim, InclineSim, PendulumSim, ScenarioControl, ScenarioKind,
};

/// Which scenarios are ticked per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Only the selected scenario animates; switching scenarios pauses all of them.
    #[default]
    ActiveOnly,
    /// Every running scenario advances, visible or not, across scenario switches.
    AllRunning,
}

/// The three scenarios plus scheduling.
#[derive(Debug, Clone)]
pub struct Lab {
    pendulum: PendulumSim,
    incline: InclineSim,
    bounce: BounceSim,
    active: ScenarioKind,
    policy: SchedulingPolicy,
}

impl Default for Lab {
    fn default() -> Self {
        Self::from_config(&LabConfig::default())
    }
}

impl Lab {
    /// Lab with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every simulator from `config`. Nothing is running afterwards.
    #[must_use]
    pub fn from_config(config: &LabConfig) -> Self {
        Self {
            pendulum: PendulumSim::with_capacity(
                config.pendulum.clone(),
                config.capacity(ScenarioKind::Pendulum),
            )
            .with_jidoka(config.jidoka),
            incline: InclineSim::with_capacity(
                config.incline.clone(),
                config.capacity(ScenarioKind::Incline),
            )
            .with_jidoka(config.jidoka),
            bounce: BounceSim::with_capacity(
                config.bounce.clone(),
                config.capacity(ScenarioKind::Bounce),
            )
            .with_jidoka(config.jidoka),
            active: ScenarioKind::Pendulum,
            policy: config.scheduling,
        }
    }

    /// Advance one frame. Returns how many scenarios ticked.
    ///
    /// A scenario ticks at most once per frame, and only while Running.
    pub fn frame(&mut self) -> usize {
        match self.policy {
            SchedulingPolicy::ActiveOnly => {
                let active = self.active;
                usize::from(Self::advance_if_running(self.scenario_mut(active)))
            }
            SchedulingPolicy::AllRunning => ScenarioKind::ALL
                .iter()
                .filter(|&&kind| Self::advance_if_running(self.scenario_mut(kind)))
                .count(),
        }
    }

    fn advance_if_running(scenario: &mut dyn ScenarioControl) -> bool {
        if scenario.is_running() {
            scenario.advance();
            true
        } else {
            false
        }
    }

    /// Switch the visible scenario.
    ///
    /// Under [`SchedulingPolicy::ActiveOnly`] every scenario is stopped, so
    /// the newly shown one waits for an explicit start. State is kept.
    pub fn select(&mut self, kind: ScenarioKind) {
        if self.policy == SchedulingPolicy::ActiveOnly {
            for other in ScenarioKind::ALL {
                self.scenario_mut(other).stop();
            }
        }
        self.active = kind;
    }

    /// The visible scenario.
    #[must_use]
    pub const fn active(&self) -> ScenarioKind {
        self.active
    }

    /// Current scheduling policy.
    #[must_use]
    pub const fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Change the scheduling policy.
    pub fn set_policy(&mut self, policy: SchedulingPolicy) {
        self.policy = policy;
    }

    /// Type-erased view of one scenario.
    #[must_use]
    pub fn scenario(&self, kind: ScenarioKind) -> &dyn ScenarioControl {
        match kind {
            ScenarioKind::Pendulum => &self.pendulum,
            ScenarioKind::Incline => &self.incline,
            ScenarioKind::Bounce => &self.bounce,
        }
    }

    /// Mutable type-erased view of one scenario.
    pub fn scenario_mut(&mut self, kind: ScenarioKind) -> &mut dyn ScenarioControl {
        match kind {
            ScenarioKind::Pendulum => &mut self.pendulum,
            ScenarioKind::Incline => &mut self.incline,
            ScenarioKind::Bounce => &mut self.bounce,
        }
    }

    /// The selected scenario.
    #[must_use]
    pub fn current(&self) -> &dyn ScenarioControl {
        self.scenario(self.active)
    }

    /// The selected scenario, mutably.
    pub fn current_mut(&mut self) -> &mut dyn ScenarioControl {
        self.scenario_mut(self.active)
    }

    /// Typed pendulum simulator.
    #[must_use]
    pub const fn pendulum(&self) -> &PendulumSim {
        &self.pendulum
    }

    /// Typed incline simulator.
    #[must_use]
    pub const fn incline(&self) -> &InclineSim {
        &self.incline
    }

    /// Typed bounce simulator.
    #[must_use]
    pub const fn bounce(&self) -> &BounceSim {
        &self.bounce
    }
}
