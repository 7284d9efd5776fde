//! Error types for configuration substitution.
//!
//! Responsibilities:
//! - Define error variants for engine construction, document parsing and rendering.
//! - Map dotenv failures to variants that carry no raw file content.
//!
//! Does NOT handle:
//! - Malformed override values (those fall back to plain strings, see `coerce.rs`).
//! - Missing overrides (absence is never an error).
//!
//! Invariants:
//! - No variant carries an override value, so errors are safe to print.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;

/// Errors that can occur while loading, substituting, or rendering configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Namespace must not be empty")]
    EmptyNamespace,

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Failed to read configuration source at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document: {message}")]
    Parse { format: Format, message: String },

    #[error("Failed to render {format} document: {message}")]
    Render { format: Format, message: String },

    /// A mapping key that has no textual form (a sequence or mapping used as a key).
    #[error("Unsupported mapping key: {key}")]
    UnsupportedKey { key: String },

    #[error("Unknown document format '{0}' (expected yaml or json)")]
    UnknownFormat(String),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotenv_parse_error_hides_line_content() {
        let err: ConfigError =
            dotenvy::Error::LineParse("SECRET=hunter2 oops".to_string(), 7).into();
        let message = err.to_string();
        assert!(message.contains("position 7"));
        assert!(!message.contains("hunter2"));
    }

    #[test]
    fn test_dotenv_io_error_keeps_kind() {
        let io_err = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        let err: ConfigError = dotenvy::Error::Io(io_err).into();
        assert!(matches!(
            err,
            ConfigError::DotenvIo {
                kind: ErrorKind::PermissionDenied
            }
        ));
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = ConfigError::Parse {
            format: Format::Json,
            message: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse json document: expected value"
        );
    }
}
