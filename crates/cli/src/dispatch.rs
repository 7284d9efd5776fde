//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::render::RenderOptions;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            input,
            namespace,
            format,
            env_file,
            output,
        } => commands::render::run(RenderOptions {
            input,
            namespace: namespace.namespace,
            format,
            env_file,
            output,
        }),
        Commands::Key { path, namespace } => commands::key::run(&namespace.namespace, &path),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
