//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and their environment variable fallbacks.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `.env` files (see `commands::render`).

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use envsub_config::Format;
use envsub_config::constants::{ENV_FILE_ENV, FORMAT_ENV, NAMESPACE_ENV};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envsub")]
#[command(about = "Override YAML/JSON configuration values from environment variables", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  MY_APP_SERVER_PORT=9000 envsub render config.yaml --namespace my_app\n  cat config.json | envsub render - -n my_app --format json\n  envsub key server.hosts.0 --namespace my_app\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Namespace shared by every command that derives variable names.
#[derive(Args, Debug, Clone)]
pub struct NamespaceArgs {
    /// Variable name prefix (e.g., my_app reads MY_APP_*)
    #[arg(short, long, env = NAMESPACE_ENV)]
    pub namespace: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply environment overrides to a configuration document
    Render {
        /// Configuration file to read ("-" reads stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        namespace: NamespaceArgs,

        /// Document format (yaml, json); inferred from the input extension if omitted
        #[arg(short, long, env = FORMAT_ENV)]
        format: Option<Format>,

        /// `.env` file layered beneath the process environment
        #[arg(long, env = ENV_FILE_ENV, value_name = "FILE")]
        env_file: Option<PathBuf>,

        /// Write the result to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the variable name that overrides a dotted path
    Key {
        /// Dotted path such as config.object.key; numeric parts are array indices
        path: String,

        #[command(flatten)]
        namespace: NamespaceArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
