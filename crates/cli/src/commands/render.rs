//! Document rendering command.
//!
//! Responsibilities:
//! - Read the base document from a file or stdin.
//! - Layer the process environment over an optional `.env` file.
//! - Write the substituted document to stdout or an output file.
//!
//! Does NOT handle:
//! - Substitution itself (see `envsub_config::SubstitutionEngine`).
//!
//! Invariants:
//! - Nothing but the rendered document is written to stdout.
//! - The output file is only written after substitution succeeds.

use anyhow::{Context, Result};
use envsub_config::{
    ConfigError, DotenvSource, FileSourceProvider, Format, Layered, ProcessEnv, SourceProvider,
    SubstitutingProvider, SubstitutionEngine,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Path that selects stdin instead of a file.
const STDIN_PATH: &str = "-";

/// Reads the whole of stdin, ignoring the requested path.
struct StdinProvider;

impl SourceProvider for StdinProvider {
    fn open(&self, _path: &str) -> Result<Vec<u8>, ConfigError> {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(|source| ConfigError::Read {
                path: PathBuf::from(STDIN_PATH),
                source,
            })?;
        Ok(bytes)
    }
}

/// Options for a single render run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub namespace: String,
    pub format: Option<Format>,
    pub env_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl RenderOptions {
    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == STDIN_PATH
    }

    /// Explicit format, else inferred from the input extension. Stdin defaults to YAML.
    fn resolved_format(&self) -> Format {
        self.format.unwrap_or_else(|| {
            if self.reads_stdin() {
                Format::default()
            } else {
                Format::from_path(&self.input)
            }
        })
    }
}

pub fn run(options: RenderOptions) -> Result<()> {
    let dotenv = DotenvSource::discover(options.env_file.as_deref())
        .context("Failed to load .env file")?;
    let engine = SubstitutionEngine::new(&options.namespace, Layered::new(ProcessEnv, dotenv))?;
    let format = options.resolved_format();

    let stdin = StdinProvider;
    let files = FileSourceProvider::new();
    let delegate: &dyn SourceProvider = if options.reads_stdin() {
        &stdin
    } else {
        &files
    };
    let provider = SubstitutingProvider::new(engine, delegate).with_format(format);

    let rendered = provider.open(input_path(&options.input)?)?;

    match &options.output {
        Some(path) => write_output(path, &rendered),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// The input path as the provider sees it. Lossy conversion would read a
/// different file, so non-UTF-8 paths are rejected.
fn input_path(path: &Path) -> Result<&str, ConfigError> {
    path.to_str().ok_or_else(|| ConfigError::Read {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path is not valid UTF-8"),
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote rendered document");
    Ok(())
}
