//! # mechlab
//!
//! Fixed-step classical mechanics lab with energy bookkeeping.
//!
//! Three scenarios share one engine:
//! - **Pendulum**: nonlinear simple pendulum
//! - **Incline**: point mass on a frictionless slope, stops at the ground
//! - **Bounce**: vertical drop with inelastic rebound, stops at rest
//!
//! Every scenario advances by semi-implicit Euler with `dt = 0.016 s` and
//! `g = 9.8 m/s²`, records potential, kinetic and total energy after each
//! tick, and keeps the most recent samples in a bounded FIFO buffer.
//!
//! ## Example
//!
//! ```rust
//! use mechlab::prelude::*;
//!
//! let mut sim = InclineSim::new(InclineParams::default());
//! sim.start();
//! while sim.is_running() {
//!     sim.tick();
//! }
//! assert_eq!(sim.state().y, 0.0);
//! assert_eq!(sim.last_halt(), Some(HaltReason::ReachedGround));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Plain a*b+c reads like the equations of motion
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lab;
pub mod scenarios;
pub mod tui;
pub mod visualization;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{LabConfig, LabConfigBuilder};
    pub use crate::engine::jidoka::JidokaConfig;
    pub use crate::engine::{
        EnergySample, JidokaGuard, RollingBuffer, SimClock, SimTime, GRAVITY, TIMESTEP,
    };
    pub use crate::error::{LabError, LabResult};
    pub use crate::lab::{Lab, SchedulingPolicy};
    pub use crate::scenarios::{
        BounceParams, BouncePhase, BounceSim, HaltReason, InclineParams, InclineSim,
        PendulumParams, PendulumSim, RunState, ScenarioControl, ScenarioKind,
    };
}

/// Re-export for public API
pub use error::{LabError, LabResult};
