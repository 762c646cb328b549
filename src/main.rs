//! mechlab CLI - fixed-step mechanics lab
//!
//! Command-line interface for running the scenarios headless.

use std::process::ExitCode;

use mechlab::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
