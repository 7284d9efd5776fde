//! Centralized constants for the envsub workspace.
//!
//! Environment variable names read by the command-line front end and the
//! separator that joins encoded path segments.

// =============================================================================
// Path Encoding
// =============================================================================

/// Separator placed between the namespace and every encoded path segment.
pub const PATH_SEPARATOR: char = '_';

/// Characters in a field name that are rewritten to [`PATH_SEPARATOR`].
pub const REPLACED_KEY_CHARS: [char; 2] = ['.', '-'];

// =============================================================================
// Tool Settings
// =============================================================================

/// Environment variable supplying the default namespace.
pub const NAMESPACE_ENV: &str = "ENVSUB_NAMESPACE";

/// Environment variable supplying the default document format.
pub const FORMAT_ENV: &str = "ENVSUB_FORMAT";

/// Environment variable naming a `.env` file layered beneath the process environment.
pub const ENV_FILE_ENV: &str = "ENVSUB_ENV_FILE";

/// When set to `1` or `true`, `.env` files are never read.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";
