//! envsub - Override configuration values from environment variables.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run the requested command against the shared substitution library.
//! - Translate failures into structured exit codes.
//!
//! Does NOT handle:
//! - Substitution rules (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr so stdout carries only command output.
//! - `.env` files are read as an override source, never loaded into the process environment.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
