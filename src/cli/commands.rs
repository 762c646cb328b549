//! CLI command handlers.
//!
//! Each handler returns an [`ExitCode`]: 0 on success, 1 on any error. The
//! fallible work lives in `execute_*` functions that return [`LabResult`] and
//! write to a caller-supplied writer.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::LabConfig;
use crate::error::LabResult;
use crate::lab::Lab;
use crate::visualization::{ExportFormat, Exporter};

use super::args::RunOptions;
use super::output::{print_help, print_version, write_scenarios, write_summary, RunSummary};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run(options) => run_scenario(&options),
        Command::Scenarios => list_scenarios(),
        Command::Config { path } => show_config(path.as_deref()),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
        Command::Invalid(message) => {
            eprintln!("Error: {message}");
            eprintln!("Run 'mechlab help' for usage.");
            ExitCode::from(1)
        }
    }
}

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins over `verbose`, which wins over the configured level.
/// A second call is a no-op.
pub fn init_tracing(config_level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { config_level })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the configuration named by `options`, or the defaults.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(options: &RunOptions) -> LabResult<LabConfig> {
    options
        .config_path
        .as_deref()
        .map_or_else(|| Ok(LabConfig::default()), LabConfig::load)
}

/// Run a scenario headless and print samples plus a summary.
#[must_use]
pub fn run_scenario(options: &RunOptions) -> ExitCode {
    let config = match load_config(options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    init_tracing(&config.logging.level, options.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match execute_run(options, &config, &mut out) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    // Keep stdout parseable for machine formats.
    let written = if options.format == ExportFormat::Table || options.output.is_some() {
        write_summary(&summary, &mut out)
    } else {
        write_summary(&summary, &mut io::stderr().lock())
    };
    if let Err(e) = written {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

/// Reset the scenario from `config`, apply overrides, run it and export its samples.
///
/// Overrides are applied before the reset so that initial conditions such
/// as `initial_angle` take effect. Samples go to `options.output` when set,
/// otherwise to `out`.
///
/// # Errors
///
/// Returns error for unknown parameter names or failed output.
pub fn execute_run<W: Write>(
    options: &RunOptions,
    config: &LabConfig,
    out: &mut W,
) -> LabResult<RunSummary> {
    let mut lab = Lab::from_config(config);
    lab.select(options.scenario);

    let scenario = lab.current_mut();
    for (name, value) in &options.overrides {
        scenario.set_parameter(name, *value)?;
    }
    scenario.reset();
    scenario.start();

    let limit = options.tick_limit();
    while lab.current().is_running() && lab.current().step_count() < limit {
        lab.frame();
    }

    let scenario = lab.current();
    debug!(
        scenario = %options.scenario,
        ticks = scenario.step_count(),
        running = scenario.is_running(),
        "run finished"
    );

    let exporter = Exporter::new(options.format);
    match &options.output {
        Some(path) => exporter.write_to_path(scenario.samples(), path)?,
        None => exporter.write(scenario.samples(), out)?,
    }

    Ok(RunSummary {
        scenario: options.scenario,
        ticks: scenario.step_count(),
        time: scenario.time(),
        running: scenario.is_running(),
        halt: scenario.last_halt(),
        max_energy_drift: scenario.max_energy_drift(),
        samples: scenario.samples().len(),
        state: scenario.state_fields(),
    })
}

/// List scenarios with their default parameters.
#[must_use]
pub fn list_scenarios() -> ExitCode {
    let stdout = io::stdout();
    match write_scenarios(&Lab::new(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Print the effective configuration as YAML.
#[must_use]
pub fn show_config(path: Option<&Path>) -> ExitCode {
    let stdout = io::stdout();
    match execute_config(path, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load and validate `path` (or take the defaults) and write it back as YAML.
///
/// # Errors
///
/// Returns error if loading, validation or writing fails.
pub fn execute_config<W: Write>(path: Option<&Path>, out: &mut W) -> LabResult<()> {
    let config = match path {
        Some(path) => LabConfig::load(path)?,
        None => LabConfig::default(),
    };
    out.write_all(config.to_yaml()?.as_bytes())?;
    Ok(())
}
