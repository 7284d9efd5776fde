//! Variable name lookup command.
//!
//! Prints the environment variable that would override a dotted path. The
//! name is computed from the path alone; the environment is never scanned.

use anyhow::Result;
use envsub_config::normalize_namespace;
use envsub_config::path::{env_key, parse_dotted};

/// Variable name for `path` under `namespace`.
pub fn variable_name(namespace: &str, path: &str) -> Result<String> {
    let namespace = normalize_namespace(namespace)?;
    Ok(env_key(&namespace, &parse_dotted(path)))
}

pub fn run(namespace: &str, path: &str) -> Result<()> {
    println!("{}", variable_name(namespace, path)?);
    Ok(())
}
