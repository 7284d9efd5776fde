//! Substitution engine.
//!
//! Responsibilities:
//! - Validate and uppercase the namespace once, at construction.
//! - Run the tree walker over a root tree with the namespace as the prefix.
//! - Offer a bytes-in, bytes-out pass for callers holding a raw document.
//!
//! Does NOT handle:
//! - Fetching documents (see `provider.rs`).
//!
//! Invariants:
//! - `substitute` is a pure function of the tree and the source's answers:
//!   the same tree and the same source always give the same result.
//! - Applying the engine twice with an unchanged source equals applying it once,
//!   as long as no override turns a leaf into a container.
//! - A root scalar has no path segment to name it and is returned unchanged.

use crate::coerce::ValueCoercer;
use crate::error::ConfigError;
use crate::format::Format;
use crate::source::OverrideSource;
use crate::tree::ConfigTree;
use crate::walker::TreeWalker;

/// Validate a namespace and return its uppercase form.
///
/// # Errors
///
/// - `ConfigError::EmptyNamespace` if the namespace is empty or whitespace-only
/// - `ConfigError::InvalidNamespace` if it contains `=` or NUL, which no
///   environment variable name can hold
pub fn normalize_namespace(namespace: &str) -> Result<String, ConfigError> {
    if namespace.trim().is_empty() {
        return Err(ConfigError::EmptyNamespace);
    }
    if let Some(c) = namespace.chars().find(|c| matches!(c, '=' | '\0')) {
        return Err(ConfigError::InvalidNamespace {
            namespace: namespace.escape_debug().to_string(),
            reason: format!("contains {:?}", c),
        });
    }
    Ok(namespace.to_uppercase())
}

/// Applies namespaced overrides to configuration trees.
#[derive(Debug, Clone)]
pub struct SubstitutionEngine<S> {
    namespace: String,
    source: S,
    coercer: ValueCoercer,
}

impl<S: OverrideSource> SubstitutionEngine<S> {
    /// Create an engine for `namespace`, validated and uppercased once here
    /// (see [`normalize_namespace`]).
    pub fn new(namespace: &str, source: S) -> Result<Self, ConfigError> {
        Ok(Self {
            namespace: normalize_namespace(namespace)?,
            source,
            coercer: ValueCoercer::default(),
        })
    }

    /// Use the value grammar of `format` when coercing overrides.
    pub fn with_format(mut self, format: Format) -> Self {
        self.coercer = ValueCoercer::new(format);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn format(&self) -> Format {
        self.coercer.format()
    }

    /// Apply every override found for `root`.
    pub fn substitute(&self, root: ConfigTree) -> ConfigTree {
        if root.is_scalar() {
            return root;
        }

        let mut walker = TreeWalker::new(&self.source, &self.coercer);
        let result = walker.walk(root, &self.namespace);
        tracing::info!(
            namespace = %self.namespace,
            applied = walker.applied().len(),
            "Applied environment overrides"
        );
        result
    }

    /// Parse `bytes` as `format`, substitute, and render back to `format`.
    ///
    /// Overrides are coerced with `format`'s grammar regardless of [`Self::with_format`].
    pub fn substitute_document(
        &self,
        bytes: &[u8],
        format: Format,
    ) -> Result<Vec<u8>, ConfigError> {
        let tree = format.parse(bytes)?;
        let engine = SubstitutionEngine {
            namespace: self.namespace.clone(),
            source: &self.source,
            coercer: ValueCoercer::new(format),
        };
        format.render(&engine.substitute(tree))
    }
}
