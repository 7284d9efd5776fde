//! Override sources.
//!
//! Responsibilities:
//! - Define the `OverrideSource` lookup used by the tree walker.
//! - Back it with the process environment, an in-memory map, or a `.env` file.
//! - Layer two sources so the first one to answer wins.
//!
//! Does NOT handle:
//! - Computing variable names (see `path.rs`).
//! - Interpreting values (see `coerce.rs`).
//!
//! Invariants:
//! - Lookups are exact-match and case-sensitive; no prefix scanning.
//! - An empty value is a present value, not an absent one.
//! - Reading a `.env` file never mutates the process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::constants::DOTENV_DISABLED_ENV;
use crate::error::ConfigError;

/// File name looked up in the working directory when no `.env` path is given.
const DEFAULT_DOTENV_FILE: &str = ".env";

/// A key to optional value lookup consulted once per scalar path.
pub trait OverrideSource {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<T: OverrideSource + ?Sized> OverrideSource for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<T: OverrideSource + ?Sized> OverrideSource for Box<T> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl OverrideSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "Ignoring override with non UTF-8 value");
                None
            }
        }
    }
}

/// An in-memory source, mostly for tests and `.env` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl OverrideSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl OverrideSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Variables read from a `.env` file.
#[derive(Debug, Clone, Default)]
pub struct DotenvSource {
    vars: MapSource,
}

impl DotenvSource {
    /// Read `path` as a `.env` file.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvIo` if the file cannot be opened or read (including not found)
    /// - `ConfigError::DotenvParse` if a line has invalid syntax
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let iter = dotenvy::from_path_iter(path)?;
        let mut vars = MapSource::new();
        for item in iter {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        tracing::debug!(path = %path.display(), count = vars.len(), "Loaded .env file");
        Ok(Self { vars })
    }

    /// Like [`DotenvSource::from_path`], but a missing file yields `Ok(None)`.
    pub fn from_path_if_exists(path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::from_path(path) {
            Ok(source) => Ok(Some(source)),
            Err(ConfigError::DotenvIo {
                kind: std::io::ErrorKind::NotFound,
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load the `.env` file a run should layer beneath the process environment.
    ///
    /// - `DOTENV_DISABLED` set to `1` or `true` skips loading entirely.
    /// - An explicit `path` must exist.
    /// - Without one, `.env` in the working directory is used if present.
    pub fn discover(path: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("Skipping .env loading ({} is set)", DOTENV_DISABLED_ENV);
            return Ok(None);
        }

        match path {
            Some(path) => Self::from_path(path).map(Some),
            None => Self::from_path_if_exists(Path::new(DEFAULT_DOTENV_FILE)),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl OverrideSource for DotenvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.lookup(key)
    }
}

/// Two sources consulted in order; the first to answer wins.
#[derive(Debug, Clone, Default)]
pub struct Layered<A, B> {
    first: A,
    second: B,
}

impl<A: OverrideSource, B: OverrideSource> Layered<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: OverrideSource, B: OverrideSource> OverrideSource for Layered<A, B> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.first
            .lookup(key)
            .or_else(|| self.second.lookup(key))
    }
}

/// Optional sources answer nothing when absent.
impl<T: OverrideSource> OverrideSource for Option<T> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|source| source.lookup(key))
    }
}
