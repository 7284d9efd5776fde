//! Document formats.
//!
//! Responsibilities:
//! - Parse YAML or JSON bytes into a `ConfigTree`.
//! - Parse single override values with the same grammar (used by `coerce.rs`).
//! - Render a `ConfigTree` back into the same format.
//!
//! Does NOT handle:
//! - Reading files (see `provider.rs`).
//!
//! Invariants:
//! - An empty or comment-only document parses to an empty mapping.
//! - Base document parse failures are fatal and reported as `ConfigError::Parse`.
//! - Mapping order survives a parse/render round trip.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::tree::{ConfigTree, Scalar};

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Infer the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    /// Parse a whole document.
    pub fn parse(&self, bytes: &[u8]) -> Result<ConfigTree, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ConfigTree::empty_mapping());
        }

        let tree = match self {
            Format::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_slice(bytes).map_err(|e| self.parse_error(e))?;
                ConfigTree::try_from(value)?
            }
            Format::Json => {
                let value: serde_json::Value =
                    serde_json::from_slice(bytes).map_err(|e| self.parse_error(e))?;
                ConfigTree::from(value)
            }
        };

        Ok(match tree {
            ConfigTree::Scalar(Scalar::Null) => ConfigTree::empty_mapping(),
            other => other,
        })
    }

    /// Parse a single inline value such as `true`, `42`, or `{a: 1}`.
    pub fn parse_value(&self, text: &str) -> Result<ConfigTree, ConfigError> {
        match self {
            Format::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(text).map_err(|e| self.parse_error(e))?;
                ConfigTree::try_from(value)
            }
            Format::Json => serde_json::from_str::<serde_json::Value>(text)
                .map(ConfigTree::from)
                .map_err(|e| self.parse_error(e)),
        }
    }

    /// Serialize a tree. JSON output is pretty-printed with a trailing newline.
    pub fn render(&self, tree: &ConfigTree) -> Result<Vec<u8>, ConfigError> {
        match self {
            Format::Yaml => serde_yaml::to_string(tree)
                .map(String::into_bytes)
                .map_err(|e| self.render_error(e)),
            Format::Json => {
                let mut out = serde_json::to_vec_pretty(tree).map_err(|e| self.render_error(e))?;
                out.push(b'\n');
                Ok(out)
            }
        }
    }

    fn parse_error(&self, error: impl fmt::Display) -> ConfigError {
        ConfigError::Parse {
            format: *self,
            message: error.to_string(),
        }
    }

    fn render_error(&self, error: impl fmt::Display) -> ConfigError {
        ConfigError::Render {
            format: *self,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "yaml"),
            Format::Json => write!(f, "json"),
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}
