//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings so that every branch can
//! be exercised from tests without touching `std::env`.

use std::path::PathBuf;

use crate::scenarios::ScenarioKind;
use crate::visualization::ExportFormat;

/// Ticks run when `--ticks` is not given.
pub const DEFAULT_TICKS: u64 = 500;

/// Hard cap for `--until-stopped`, which would otherwise never end for the pendulum.
pub const UNTIL_STOPPED_LIMIT: u64 = 1_000_000;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options of the `run` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Scenario to run.
    pub scenario: ScenarioKind,
    /// Maximum number of ticks.
    pub ticks: u64,
    /// Ignore `ticks` and run until the scenario stops itself.
    pub until_stopped: bool,
    /// Optional YAML configuration.
    pub config_path: Option<PathBuf>,
    /// `--set name=value` overrides, applied in order after reset.
    pub overrides: Vec<(String, f64)>,
    /// Sample output format.
    pub format: ExportFormat,
    /// Write samples here instead of stdout.
    pub output: Option<PathBuf>,
    /// Enable debug logging.
    pub verbose: bool,
}

impl RunOptions {
    /// Options with defaults for `scenario`.
    #[must_use]
    pub fn new(scenario: ScenarioKind) -> Self {
        Self {
            scenario,
            ticks: DEFAULT_TICKS,
            until_stopped: false,
            config_path: None,
            overrides: Vec::new(),
            format: ExportFormat::Table,
            output: None,
            verbose: false,
        }
    }

    /// Effective tick cap.
    #[must_use]
    pub const fn tick_limit(&self) -> u64 {
        if self.until_stopped {
            UNTIL_STOPPED_LIMIT
        } else {
            self.ticks
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run one scenario headless and print its energy samples.
    Run(RunOptions),
    /// List scenarios with their parameters and defaults.
    Scenarios,
    /// Print the default configuration, or validate and print a file.
    Config {
        /// File to validate.
        path: Option<PathBuf>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
    /// Arguments could not be parsed.
    Invalid(String),
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "scenarios" | "list" => Command::Scenarios,
            "config" => Command::Config {
                path: args.get(2).map(PathBuf::from),
            },
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => Command::Invalid(format!("unknown command '{unknown}'")),
        };

        Self { command }
    }

    fn parse_run_command(rest: &[String]) -> Command {
        match Self::try_parse_run(rest) {
            Ok(options) => Command::Run(options),
            Err(message) => Command::Invalid(message),
        }
    }

    fn try_parse_run(rest: &[String]) -> Result<RunOptions, String> {
        let Some(name) = rest.first() else {
            return Err("'run' requires a scenario (pendulum, incline, bounce)".to_string());
        };
        let scenario: ScenarioKind = name.parse().map_err(|e| format!("{e}"))?;
        let mut options = RunOptions::new(scenario);

        let mut iter = rest[1..].iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--ticks" | "-n" => {
                    let value = Self::value_of(arg, iter.next())?;
                    options.ticks = value
                        .parse()
                        .map_err(|_| format!("invalid tick count '{value}'"))?;
                }
                "--until-stopped" => options.until_stopped = true,
                "--config" | "-c" => {
                    options.config_path = Some(PathBuf::from(Self::value_of(arg, iter.next())?));
                }
                "--set" | "-s" => {
                    let value = Self::value_of(arg, iter.next())?;
                    options.overrides.push(Self::parse_override(value)?);
                }
                "--format" | "-f" => {
                    let value = Self::value_of(arg, iter.next())?;
                    options.format = value.parse().map_err(|e| format!("{e}"))?;
                }
                "--output" | "-o" => {
                    options.output = Some(PathBuf::from(Self::value_of(arg, iter.next())?));
                }
                "-v" | "--verbose" => options.verbose = true,
                other => return Err(format!("unexpected argument '{other}'")),
            }
        }

        Ok(options)
    }

    fn value_of<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str, String> {
        value
            .map(String::as_str)
            .ok_or_else(|| format!("'{flag}' requires a value"))
    }

    fn parse_override(pair: &str) -> Result<(String, f64), String> {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected name=value, got '{pair}'"))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid number '{value}' for '{name}'"))?;
        Ok((name.trim().to_string(), value))
    }
}
