//! CLI output formatting.
//!
//! Everything except help and version writes to a caller-supplied writer so
//! tests can capture it.

use std::io::{self, Write};

use crate::lab::Lab;
use crate::scenarios::{HaltReason, ScenarioKind};

/// Result of a headless `run`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Scenario that ran.
    pub scenario: ScenarioKind,
    /// Ticks performed.
    pub ticks: u64,
    /// Scenario time at the end (s).
    pub time: f64,
    /// Still Running when the tick cap was hit.
    pub running: bool,
    /// Why the scenario stopped itself, if it did.
    pub halt: Option<HaltReason>,
    /// Largest relative energy drift.
    pub max_energy_drift: f64,
    /// Samples held in the buffer.
    pub samples: usize,
    /// Final state components.
    pub state: Vec<(&'static str, f64)>,
}

/// Version string, with the git hash when the build embedded one.
#[must_use]
pub fn version_string() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            let short = hash.get(..7).unwrap_or(hash);
            format!("mechlab {} ({short})", env!("CARGO_PKG_VERSION"))
        }
        _ => format!("mechlab {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
    if let Some(stamp) = option_env!("BUILD_TIMESTAMP") {
        println!("built: {stamp} (unix)");
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"mechlab - fixed-step mechanics lab (pendulum, incline, bouncing ball)

USAGE:
    mechlab <COMMAND> [OPTIONS]

COMMANDS:
    run <scenario>              Run a scenario headless and print its energy samples
        -n, --ticks <N>         Maximum ticks (default: 500)
        --until-stopped         Run until the scenario stops itself
        -c, --config <FILE>     Load parameters from a YAML configuration
        -s, --set <NAME=VALUE>  Override a parameter after reset (repeatable)
        -f, --format <FMT>      table, csv or jsonl (default: table)
        -o, --output <FILE>     Write samples to FILE instead of stdout
        -v, --verbose           Debug logging on stderr

    scenarios                   List scenarios, parameters and defaults
    config [FILE]               Print the default configuration, or validate FILE
    help                        Show this help message
    version                     Show version information

SCENARIOS:
    pendulum                    Simple nonlinear pendulum
    incline (slope)             Point mass on a frictionless slope
    bounce (freefall)           Vertical drop with inelastic rebound

EXAMPLES:
    mechlab run pendulum --ticks 1000 --format csv
    mechlab run incline --until-stopped --set slope_angle=0.7854
    mechlab run bounce --set restitution=0.6 -f jsonl -o bounce.jsonl

Angles are in radians. Logging honours RUST_LOG.
"
    );
}

/// List every scenario with its parameters at their default values.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_scenarios<W: Write>(lab: &Lab, out: &mut W) -> io::Result<()> {
    for kind in ScenarioKind::ALL {
        let scenario = lab.scenario(kind);
        writeln!(out, "{:<10} {}", kind.name(), kind.title())?;
        for &name in scenario.parameter_names() {
            let value = scenario.parameter(name).unwrap_or(f64::NAN);
            writeln!(out, "    {name:<16} {value:>10.4}")?;
        }
        writeln!(out, "    {:<16} {:>10}", "buffer", scenario.samples().capacity())?;
    }
    Ok(())
}

/// Human-readable run summary.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_summary<W: Write>(summary: &RunSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(out, "Scenario: {}", summary.scenario.title())?;
    writeln!(out, "Ticks:    {}", summary.ticks)?;
    writeln!(out, "Time:     {:.3} s", summary.time)?;
    let status = match (summary.running, summary.halt) {
        (true, _) => "running (tick limit reached)".to_string(),
        (false, Some(reason)) => format!("stopped ({reason})"),
        (false, None) => "stopped".to_string(),
    };
    writeln!(out, "Status:   {status}")?;
    writeln!(out, "Samples:  {}", summary.samples)?;
    writeln!(out, "Drift:    {:.3}%", summary.max_energy_drift * 100.0)?;
    writeln!(out, "Final state:")?;
    for (name, value) in &summary.state {
        writeln!(out, "    {name:<18} {value:>12.4}")?;
    }
    Ok(())
}
