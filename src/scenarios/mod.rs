//! Scenario simulators.
//!
//! Each scenario is a [`Model`] (equations of motion plus energy) driven by
//! the generic [`Simulator`], which owns everything the three scenarios have
//! in common: the run/stop state machine, the fixed-step clock, the energy
//! sample buffer and the Jidoka guard.
//!
//! - [`pendulum`]: simple nonlinear pendulum
//! - [`incline`]: point mass sliding down a frictionless slope
//! - [`bounce`]: vertical drop with inelastic rebound
//!
//! [`limits`] holds the accepted parameter ranges.

pub mod bounce;
pub mod incline;
pub mod limits;
pub mod pendulum;

use std::fmt::Debug;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::engine::energy::relative_drift;
use crate::engine::jidoka::JidokaConfig;
use crate::engine::{EnergySample, JidokaGuard, RollingBuffer, SimClock};
use crate::error::{LabError, LabResult};

pub use bounce::{Bounce, BounceParams, BouncePhase, BounceSim, BounceState};
pub use incline::{Incline, InclineParams, InclineSim, InclineState};
pub use limits::ParamRange;
pub use pendulum::{Pendulum, PendulumParams, PendulumSim, PendulumState};

/// The three lab scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Simple pendulum.
    Pendulum,
    /// Frictionless incline.
    Incline,
    /// Bouncing ball.
    Bounce,
}

impl ScenarioKind {
    /// All scenarios in tab order.
    pub const ALL: [Self; 3] = [Self::Pendulum, Self::Incline, Self::Bounce];

    /// Machine name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pendulum => "pendulum",
            Self::Incline => "incline",
            Self::Bounce => "bounce",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pendulum => "Simple Pendulum",
            Self::Incline => "Frictionless Incline",
            Self::Bounce => "Bouncing Ball",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Pendulum => 0,
            Self::Incline => 1,
            Self::Bounce => 2,
        }
    }

    /// Next scenario in tab order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pendulum => Self::Incline,
            Self::Incline => Self::Bounce,
            Self::Bounce => Self::Pendulum,
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pendulum" => Ok(Self::Pendulum),
            "incline" | "slope" => Ok(Self::Incline),
            "bounce" | "freefall" => Ok(Self::Bounce),
            _ => Err(LabError::UnknownScenario(s.to_string())),
        }
    }
}

/// Running/Stopped flag of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Initial state; reached by pause, reset or a terminal condition.
    #[default]
    Stopped,
    /// Ticks are being scheduled.
    Running,
}

/// Why a scenario stopped itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// Incline: the mass reached the ground.
    ReachedGround,
    /// Bounce: rebound speed fell below the rest threshold.
    CameToRest,
    /// Jidoka: the state went non-finite.
    NonFinite,
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ReachedGround => "reached ground",
            Self::CameToRest => "came to rest",
            Self::NonFinite => "non-finite state",
        })
    }
}

/// Outcome of one integrator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep going.
    Continue,
    /// Terminal condition reached; the scenario stops.
    Halt(HaltReason),
}

/// Equations of motion and energy for one scenario.
///
/// Implementations are stateless; all mutable data lives in `State`.
pub trait Model {
    /// Configurable parameters.
    type Params: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned;
    /// Physical state advanced by [`Model::integrate`].
    type State: Copy + Debug + PartialEq + Serialize;

    /// Which scenario this is.
    const KIND: ScenarioKind;
    /// Sample buffer capacity.
    const DEFAULT_CAPACITY: usize;
    /// Canonical parameter names.
    const PARAMETERS: &'static [&'static str];

    /// State right after reset.
    fn initial_state(params: &Self::Params) -> Self::State;

    /// Advance `state` by `dt` seconds.
    fn integrate(params: &Self::Params, state: &mut Self::State, dt: f64) -> Transition;

    /// `(potential, kinetic)` energy of `state`.
    fn energy(params: &Self::Params, state: &Self::State) -> (f64, f64);

    /// Read a parameter by name.
    fn parameter(params: &Self::Params, name: &str) -> Option<f64>;

    /// Write a parameter by name. Returns `false` for unknown names.
    fn set_parameter(params: &mut Self::Params, name: &str, value: f64) -> bool;

    /// Named state components, for display and the Jidoka guard.
    fn components(state: &Self::State) -> Vec<(&'static str, f64)>;
}

/// State at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot<S> {
    /// Scenario time (s).
    pub time: f64,
    /// Ticks since reset.
    pub step: u64,
    /// Physical state.
    pub state: S,
}

/// Everything a renderer needs after one tick.
#[derive(Debug)]
pub struct TickResult<S> {
    /// State after the tick.
    pub snapshot: Snapshot<S>,
    /// Energy at `snapshot`. Appended to the buffer only when `advanced`.
    pub sample: EnergySample,
    /// False when the scenario was Stopped and nothing was integrated.
    pub advanced: bool,
    /// Whether the scenario is still running.
    pub running: bool,
    /// Set when this tick stopped the scenario.
    pub halt: Option<HaltReason>,
    /// Jidoka violation, when the guard tripped.
    pub violation: Option<LabError>,
}

/// Type-erased tick outcome for drivers that do not read the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Energy at the end of the call.
    pub sample: EnergySample,
    /// Whether a step was integrated.
    pub advanced: bool,
    /// Whether the scenario is still running.
    pub running: bool,
    /// Set when this tick stopped the scenario.
    pub halt: Option<HaltReason>,
}

impl<S> From<&TickResult<S>> for TickOutcome {
    fn from(result: &TickResult<S>) -> Self {
        Self {
            sample: result.sample,
            advanced: result.advanced,
            running: result.running,
            halt: result.halt,
        }
    }
}

/// Scenario simulator: state machine, clock and sample buffer around a [`Model`].
///
/// ```rust
/// use mechlab::scenarios::{PendulumParams, PendulumSim};
///
/// let mut sim = PendulumSim::new(PendulumParams::default());
/// sim.start();
/// let result = sim.tick();
/// assert!(result.running);
/// assert_eq!(sim.samples().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<M: Model> {
    params: M::Params,
    state: M::State,
    clock: SimClock,
    samples: RollingBuffer<EnergySample>,
    run_state: RunState,
    jidoka: JidokaGuard,
    reference_energy: f64,
    max_energy_drift: f64,
    last_halt: Option<HaltReason>,
}

impl<M: Model> Simulator<M> {
    /// Create a stopped simulator at its initial state.
    #[must_use]
    pub fn new(params: M::Params) -> Self {
        Self::with_capacity(params, M::DEFAULT_CAPACITY)
    }

    /// Create with a non-default sample buffer capacity.
    #[must_use]
    pub fn with_capacity(params: M::Params, capacity: usize) -> Self {
        let state = M::initial_state(&params);
        let reference_energy = Self::total_energy(&params, &state);
        Self {
            params,
            state,
            clock: SimClock::default(),
            samples: RollingBuffer::new(capacity),
            run_state: RunState::Stopped,
            jidoka: JidokaGuard::default(),
            reference_energy,
            max_energy_drift: 0.0,
            last_halt: None,
        }
    }

    /// Replace the Jidoka guard configuration.
    #[must_use]
    pub fn with_jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = JidokaGuard::new(config);
        self
    }

    fn total_energy(params: &M::Params, state: &M::State) -> f64 {
        let (pe, ke) = M::energy(params, state);
        pe + ke
    }

    /// Reinitialize state from the current parameters, clear the buffer and stop.
    pub fn reset(&mut self) -> Snapshot<M::State> {
        self.state = M::initial_state(&self.params);
        self.clock.reset();
        self.samples.clear();
        self.run_state = RunState::Stopped;
        self.reference_energy = Self::total_energy(&self.params, &self.state);
        self.max_energy_drift = 0.0;
        self.last_halt = None;
        debug!(
            scenario = M::KIND.name(),
            params = ?self.params,
            "scenario reset"
        );
        self.snapshot()
    }

    /// Replace all parameters, then [`reset`](Self::reset).
    pub fn reset_with(&mut self, params: M::Params) -> Snapshot<M::State> {
        self.params = params;
        self.reset()
    }

    /// Update one parameter. Takes effect from the next tick; state is not reset.
    ///
    /// Values are not range-checked here.
    ///
    /// # Errors
    ///
    /// Returns `LabError::UnknownParameter` if `name` is not a parameter of
    /// this scenario.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> LabResult<()> {
        if M::set_parameter(&mut self.params, name, value) {
            debug!(scenario = M::KIND.name(), name, value, "parameter changed");
            Ok(())
        } else {
            Err(LabError::unknown_parameter(
                M::KIND.name(),
                name,
                M::PARAMETERS,
            ))
        }
    }

    /// Read one parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<f64> {
        M::parameter(&self.params, name)
    }

    /// Enter Running.
    pub fn start(&mut self) {
        if self.run_state == RunState::Stopped {
            debug!(scenario = M::KIND.name(), step = self.clock.step_count(), "start");
        }
        self.run_state = RunState::Running;
    }

    /// Enter Stopped.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            debug!(scenario = M::KIND.name(), step = self.clock.step_count(), "stop");
        }
        self.run_state = RunState::Stopped;
    }

    /// Advance one fixed step, sample energy and append to the buffer.
    ///
    /// Integrates only while Running. A Stopped scenario is left untouched:
    /// no step, no sample, and the result reports the current snapshot.
    pub fn tick(&mut self) -> TickResult<M::State> {
        if !self.is_running() {
            let (pe, ke) = M::energy(&self.params, &self.state);
            let snapshot = self.snapshot();
            return TickResult {
                sample: EnergySample::new(snapshot.time, pe, ke),
                snapshot,
                advanced: false,
                running: false,
                halt: None,
                violation: None,
            };
        }

        let transition = M::integrate(&self.params, &mut self.state, self.clock.dt());
        let time = self.clock.tick();

        let (pe, ke) = M::energy(&self.params, &self.state);
        let sample = EnergySample::new(time.as_secs_f64(), pe, ke);
        self.samples.push(sample);

        if sample.total_energy.is_finite() {
            let drift = relative_drift(sample.total_energy, self.reference_energy);
            self.max_energy_drift = self.max_energy_drift.max(drift);
        }

        trace!(
            scenario = M::KIND.name(),
            step = self.clock.step_count(),
            pe,
            ke,
            "tick"
        );

        let mut halt = None;
        if let Transition::Halt(reason) = transition {
            info!(
                scenario = M::KIND.name(),
                time = %time,
                %reason,
                "scenario stopped"
            );
            self.run_state = RunState::Stopped;
            halt = Some(reason);
        }

        let mut components = M::components(&self.state);
        components.push(("potential_energy", pe));
        components.push(("kinetic_energy", ke));
        let violation = self.jidoka.check(M::KIND.name(), &components).err();
        if let Some(err) = &violation {
            warn!(scenario = M::KIND.name(), error = %err, "jidoka stop");
            self.run_state = RunState::Stopped;
            halt.get_or_insert(HaltReason::NonFinite);
        }

        if halt.is_some() {
            self.last_halt = halt;
        }

        TickResult {
            snapshot: self.snapshot(),
            sample,
            advanced: true,
            running: self.is_running(),
            halt,
            violation,
        }
    }

    /// Current state with its timestamp.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<M::State> {
        Snapshot {
            time: self.clock.current_time().as_secs_f64(),
            step: self.clock.step_count(),
            state: self.state,
        }
    }

    /// Current physical state.
    #[must_use]
    pub const fn state(&self) -> &M::State {
        &self.state
    }

    /// Current parameters.
    #[must_use]
    pub const fn params(&self) -> &M::Params {
        &self.params
    }

    /// Energy samples, oldest first.
    #[must_use]
    pub const fn samples(&self) -> &RollingBuffer<EnergySample> {
        &self.samples
    }

    /// Running or Stopped.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Shorthand for `run_state() == Running`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Ticks since reset.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.clock.step_count()
    }

    /// Total energy right after the last reset.
    #[must_use]
    pub const fn reference_energy(&self) -> f64 {
        self.reference_energy
    }

    /// Largest relative deviation of total energy from the reference seen since reset.
    #[must_use]
    pub const fn max_energy_drift(&self) -> f64 {
        self.max_energy_drift
    }

    /// Most recent self-stop since reset.
    #[must_use]
    pub const fn last_halt(&self) -> Option<HaltReason> {
        self.last_halt
    }
}

/// Object-safe control surface shared by all simulators.
pub trait ScenarioControl {
    /// Which scenario this is.
    fn kind(&self) -> ScenarioKind;
    /// Enter Running.
    fn start(&mut self);
    /// Enter Stopped.
    fn stop(&mut self);
    /// Reinitialize from current parameters and clear the buffer.
    fn reset(&mut self);
    /// Tick once, discarding the typed snapshot. A no-op while Stopped.
    fn advance(&mut self) -> TickOutcome;
    /// Update a parameter by name.
    ///
    /// # Errors
    ///
    /// Returns `LabError::UnknownParameter` for names the scenario does not have.
    fn set_parameter(&mut self, name: &str, value: f64) -> LabResult<()>;
    /// Read a parameter by name.
    fn parameter(&self, name: &str) -> Option<f64>;
    /// Canonical parameter names.
    fn parameter_names(&self) -> &'static [&'static str];
    /// Named state components.
    fn state_fields(&self) -> Vec<(&'static str, f64)>;
    /// Energy samples, oldest first.
    fn samples(&self) -> &RollingBuffer<EnergySample>;
    /// Running or Stopped.
    fn run_state(&self) -> RunState;
    /// Ticks since reset.
    fn step_count(&self) -> u64;
    /// Scenario time (s).
    fn time(&self) -> f64;
    /// Largest relative energy drift since reset.
    fn max_energy_drift(&self) -> f64;
    /// Most recent self-stop since reset.
    fn last_halt(&self) -> Option<HaltReason>;

    /// Shorthand for `run_state() == Running`.
    fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// Flip between Running and Stopped.
    fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }
}

impl<M: Model> ScenarioControl for Simulator<M> {
    fn kind(&self) -> ScenarioKind {
        M::KIND
    }

    fn start(&mut self) {
        Self::start(self);
    }

    fn stop(&mut self) {
        Self::stop(self);
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn advance(&mut self) -> TickOutcome {
        TickOutcome::from(&self.tick())
    }

    fn set_parameter(&mut self, name: &str, value: f64) -> LabResult<()> {
        Self::set_parameter(self, name, value)
    }

    fn parameter(&self, name: &str) -> Option<f64> {
        Self::parameter(self, name)
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        M::PARAMETERS
    }

    fn state_fields(&self) -> Vec<(&'static str, f64)> {
        M::components(&self.state)
    }

    fn samples(&self) -> &RollingBuffer<EnergySample> {
        &self.samples
    }

    fn run_state(&self) -> RunState {
        self.run_state
    }

    fn step_count(&self) -> u64 {
        self.clock.step_count()
    }

    fn time(&self) -> f64 {
        self.clock.current_time().as_secs_f64()
    }

    fn max_energy_drift(&self) -> f64 {
        self.max_energy_drift
    }

    fn last_halt(&self) -> Option<HaltReason> {
        self.last_halt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TIMESTEP;

    #[test]
    fn test_kind_parsing_and_aliases() {
        assert_eq!("pendulum".parse::<ScenarioKind>().ok(), Some(ScenarioKind::Pendulum));
        assert_eq!("Slope".parse::<ScenarioKind>().ok(), Some(ScenarioKind::Incline));
        assert_eq!("freefall".parse::<ScenarioKind>().ok(), Some(ScenarioKind::Bounce));
        assert!("orbit".parse::<ScenarioKind>().is_err());
    }

    #[test]
    fn test_kind_tab_order() {
        for (i, kind) in ScenarioKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(ScenarioKind::Bounce.next(), ScenarioKind::Pendulum);
    }

    #[test]
    fn test_new_simulator_is_stopped_and_empty() {
        let sim = PendulumSim::new(PendulumParams::default());
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert!(sim.samples().is_empty());
        assert_eq!(sim.step_count(), 0);
        assert_eq!(sim.samples().capacity(), 100);
    }

    #[test]
    fn test_start_stop_toggle() {
        let mut sim = BounceSim::new(BounceParams::default());
        sim.start();
        assert!(sim.is_running());
        sim.stop();
        assert!(!sim.is_running());

        let control: &mut dyn ScenarioControl = &mut sim;
        control.toggle();
        assert!(control.is_running());
        control.toggle();
        assert!(!control.is_running());
    }

    #[test]
    fn test_tick_appends_one_sample_with_time() {
        let mut sim = InclineSim::new(InclineParams::default());
        sim.start();
        let result = sim.tick();
        assert_eq!(sim.samples().len(), 1);
        assert!((result.sample.time - TIMESTEP).abs() < 1e-12);
        assert!((result.snapshot.time - TIMESTEP).abs() < 1e-12);
        assert_eq!(result.snapshot.step, 1);
        assert!(result.running);
        assert!(result.halt.is_none());
    }

    #[test]
    fn test_tick_while_stopped_is_a_no_op() {
        let mut sim = PendulumSim::new(PendulumParams::default());
        let before = sim.snapshot();
        let result = sim.tick();
        assert!(!result.advanced);
        assert!(!result.running);
        assert_eq!(result.snapshot, before);
        assert!(sim.samples().is_empty());
        assert_eq!(sim.step_count(), 0);

        sim.start();
        sim.tick();
        sim.stop();
        let paused = sim.snapshot();
        let result = sim.tick();
        assert_eq!(result.snapshot, paused);
        assert_eq!(sim.samples().len(), 1);
    }

    #[test]
    fn test_bounce_at_rest_is_terminal_for_tick() {
        let mut sim = BounceSim::new(BounceParams::default());
        sim.start();
        while sim.is_running() && sim.step_count() < 50_000 {
            sim.tick();
        }
        assert_eq!(sim.last_halt(), Some(HaltReason::CameToRest));
        let rest = sim.snapshot();
        let samples = sim.samples().to_vec();

        for _ in 0..5 {
            let result = sim.tick();
            assert!(!result.advanced);
            assert!(result.halt.is_none());
        }
        assert_eq!(sim.snapshot(), rest);
        assert_eq!(sim.state().bounces, rest.state.bounces);
        assert_eq!(sim.samples().to_vec(), samples);
    }

    #[test]
    fn test_incline_at_ground_is_terminal_for_tick() {
        let mut sim = InclineSim::new(InclineParams::default());
        sim.start();
        while sim.is_running() && sim.step_count() < 10_000 {
            sim.tick();
        }
        assert_eq!(sim.last_halt(), Some(HaltReason::ReachedGround));
        let ground = sim.snapshot();

        let result = sim.tick();
        assert!(!result.advanced);
        assert_eq!(sim.snapshot(), ground);
        assert_eq!(sim.state().x, ground.state.x);
        assert_eq!(sim.state().velocity, ground.state.velocity);
        let control: &mut dyn ScenarioControl = &mut sim;
        assert!(!control.advance().advanced);
        assert_eq!(control.step_count(), ground.step);
    }

    #[test]
    fn test_reset_clears_and_stops() {
        let mut sim = PendulumSim::new(PendulumParams::default());
        sim.start();
        for _ in 0..50 {
            sim.tick();
        }
        let snap = sim.reset();
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert!(sim.samples().is_empty());
        assert_eq!(snap.step, 0);
        assert!(snap.time.abs() < f64::EPSILON);
        assert!(sim.max_energy_drift().abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_with_replaces_params() {
        let mut sim = PendulumSim::new(PendulumParams::default());
        let params = PendulumParams {
            length: 3.0,
            ..PendulumParams::default()
        };
        sim.reset_with(params.clone());
        assert_eq!(sim.params(), &params);
    }

    #[test]
    fn test_unknown_parameter_is_rejected() {
        let mut sim = InclineSim::new(InclineParams::default());
        let err = sim.set_parameter("friction", 0.3).expect_err("unknown");
        assert!(matches!(err, LabError::UnknownParameter { .. }));
    }

    #[test]
    fn test_parameter_change_does_not_reset_state() {
        let mut sim = PendulumSim::new(PendulumParams::default());
        sim.start();
        for _ in 0..10 {
            sim.tick();
        }
        let before = *sim.state();
        sim.set_parameter("mass", 5.0).expect("known parameter");
        assert_eq!(*sim.state(), before);
        assert_eq!(sim.step_count(), 10);
        assert_eq!(sim.samples().len(), 10);
        assert_eq!(sim.parameter("mass"), Some(5.0));
    }

    #[test]
    fn test_jidoka_stops_on_non_finite_state() {
        let mut sim = PendulumSim::new(PendulumParams::default());
        sim.set_parameter("length", 0.0).expect("known parameter");
        sim.start();
        let result = sim.tick();
        assert!(!result.running);
        assert_eq!(result.halt, Some(HaltReason::NonFinite));
        assert!(result.violation.is_some_and(|e| e.is_jidoka_violation()));
        // The sample is still recorded.
        assert_eq!(sim.samples().len(), 1);
    }

    #[test]
    fn test_disabled_jidoka_keeps_running() {
        let mut sim = PendulumSim::new(PendulumParams::default()).with_jidoka(JidokaConfig {
            check_finite: false,
        });
        sim.set_parameter("length", 0.0).expect("known parameter");
        sim.start();
        let result = sim.tick();
        assert!(result.running);
        assert!(result.violation.is_none());
    }

    #[test]
    fn test_dyn_control_surface() {
        let mut sim = BounceSim::new(BounceParams::default());
        let control: &mut dyn ScenarioControl = &mut sim;
        assert_eq!(control.kind(), ScenarioKind::Bounce);
        assert_eq!(control.parameter_names(), Bounce::PARAMETERS);
        control.start();
        let outcome = control.advance();
        assert!(outcome.running);
        assert_eq!(control.step_count(), 1);
        assert!((control.time() - TIMESTEP).abs() < 1e-12);
        control.reset();
        assert_eq!(control.step_count(), 0);
        assert!(control.samples().is_empty());
    }
}
