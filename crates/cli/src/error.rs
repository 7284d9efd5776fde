//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 matches clap's own code for usage errors.

use envsub_config::ConfigError;

/// Structured exit codes for envsub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Usage error - missing or unusable namespace, unknown format.
    ///
    /// Scripts should fix the invocation and not retry.
    UsageError = 2,

    /// Input error - the document or `.env` file could not be read.
    InputError = 3,

    /// Parse error - the base document or `.env` file is malformed.
    ParseError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::EmptyNamespace
            | ConfigError::InvalidNamespace { .. }
            | ConfigError::UnknownFormat(_) => ExitCode::UsageError,

            ConfigError::Read { .. } | ConfigError::DotenvIo { .. } => ExitCode::InputError,

            ConfigError::Parse { .. }
            | ConfigError::UnsupportedKey { .. }
            | ConfigError::DotenvParse { .. } => ExitCode::ParseError,

            ConfigError::Render { .. } | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use envsub_config::Format;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 2);
        assert_eq!(ExitCode::InputError.as_i32(), 3);
        assert_eq!(ExitCode::ParseError.as_i32(), 4);
    }

    #[test]
    fn test_config_error_mapping() {
        assert_eq!(
            ExitCode::from(&ConfigError::EmptyNamespace),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from(&ConfigError::DotenvIo {
                kind: std::io::ErrorKind::NotFound
            }),
            ExitCode::InputError
        );
        assert_eq!(
            ExitCode::from(&ConfigError::Parse {
                format: Format::Yaml,
                message: "bad".to_string()
            }),
            ExitCode::ParseError
        );
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = Err::<(), _>(ConfigError::EmptyNamespace)
            .context("Failed to render")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::UsageError);
    }

    #[test]
    fn test_unrelated_error_is_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
