//! Raw configuration providers.
//!
//! Responsibilities:
//! - Define `SourceProvider`, which fetches raw document bytes by path.
//! - Read documents from the filesystem.
//! - Wrap another provider so the bytes it returns already carry overrides.
//!
//! Does NOT handle:
//! - Deserializing the result into application types; callers do that with the
//!   bytes `open` returns, exactly as they would with the undecorated provider.
//!
//! Invariants:
//! - `SubstitutingProvider::open` returns bytes in the same format it received.
//! - Errors from the delegate are returned unchanged.

use std::path::{Path, PathBuf};

use crate::engine::SubstitutionEngine;
use crate::error::ConfigError;
use crate::format::Format;
use crate::source::OverrideSource;

/// Supplies raw configuration documents keyed by a path identifier.
pub trait SourceProvider {
    fn open(&self, path: &str) -> Result<Vec<u8>, ConfigError>;
}

impl<T: SourceProvider + ?Sized> SourceProvider for &T {
    fn open(&self, path: &str) -> Result<Vec<u8>, ConfigError> {
        (**self).open(path)
    }
}

/// Reads documents from the local filesystem, optionally under a base directory.
#[derive(Debug, Clone, Default)]
pub struct FileSourceProvider {
    base_dir: Option<PathBuf>,
}

impl FileSourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl SourceProvider for FileSourceProvider {
    fn open(&self, path: &str) -> Result<Vec<u8>, ConfigError> {
        let resolved = self.resolve(path);
        std::fs::read(&resolved).map_err(|source| ConfigError::Read {
            path: resolved,
            source,
        })
    }
}

/// A provider whose documents have environment overrides applied.
pub struct SubstitutingProvider<P, S> {
    delegate: P,
    engine: SubstitutionEngine<S>,
    format: Option<Format>,
}

impl<P: SourceProvider, S: OverrideSource> SubstitutingProvider<P, S> {
    /// Wrap `delegate`, inferring each document's format from its path.
    pub fn new(engine: SubstitutionEngine<S>, delegate: P) -> Self {
        Self {
            delegate,
            engine,
            format: None,
        }
    }

    /// Treat every document as `format` instead of inferring it.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    fn format_for(&self, path: &str) -> Format {
        self.format
            .unwrap_or_else(|| Format::from_path(Path::new(path)))
    }
}

impl<P: SourceProvider, S: OverrideSource> SourceProvider for SubstitutingProvider<P, S> {
    fn open(&self, path: &str) -> Result<Vec<u8>, ConfigError> {
        let raw = self.delegate.open(path)?;
        let format = self.format_for(path);
        tracing::debug!(path, %format, "Substituting configuration document");
        self.engine.substitute_document(&raw, format)
    }
}
