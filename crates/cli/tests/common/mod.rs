//! Shared test utilities for envsub integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - Overrides in tests use namespaces no host environment sets (`ENVSUB_IT_*`).

use assert_cmd::Command;

/// Returns a hermetic `envsub` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - The tool's own settings are cleared so host values cannot leak in.
pub fn envsub_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envsub");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("ENVSUB_NAMESPACE")
        .env_remove("ENVSUB_FORMAT")
        .env_remove("ENVSUB_ENV_FILE")
        .env_remove("RUST_LOG");

    cmd
}
