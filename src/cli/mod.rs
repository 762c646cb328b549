//! CLI module for mechlab.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point `run_cli` takes parsed arguments and returns an exit code.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions, DEFAULT_TICKS, UNTIL_STOPPED_LIMIT};
pub use commands::{
    execute_config, execute_run, init_tracing, list_scenarios, load_config, run_cli,
    run_scenario, show_config,
};
pub use output::{
    print_help, print_version, version_string, write_scenarios, write_summary, RunSummary,
};
