//! Environment overrides for hierarchical configuration documents.
//!
//! This crate walks a parsed YAML or JSON document, derives an environment
//! variable name for every scalar leaf and sequence slot, and replaces values
//! whose variable is set. One base file can then serve many deployments.
//!
//! A leaf at `config.object.key` under namespace `my_app` is overridden by
//! `MY_APP_CONFIG_OBJECT_KEY`:
//!
//! ```rust
//! use envsub_config::{Format, MapSource, SubstitutionEngine};
//!
//! let source = MapSource::new().with_var("MY_APP_CONFIG_OBJECT_KEY", "test");
//! let engine = SubstitutionEngine::new("my_app", source).unwrap();
//! let out = engine
//!     .substitute_document(b"config:\n  object:\n    key: value\n", Format::Yaml)
//!     .unwrap();
//! assert_eq!(out, b"config:\n  object:\n    key: test\n");
//! ```

mod coerce;
pub mod constants;
mod engine;
mod error;
mod format;
pub mod path;
mod provider;
mod source;
mod tree;
mod walker;

pub use coerce::ValueCoercer;
pub use engine::{SubstitutionEngine, normalize_namespace};
pub use error::ConfigError;
pub use format::Format;
pub use path::{PathSegment, env_key};
pub use provider::{FileSourceProvider, SourceProvider, SubstitutingProvider};
pub use source::{DotenvSource, Layered, MapSource, OverrideSource, ProcessEnv};
pub use tree::{ConfigTree, Mapping, Scalar};
pub use walker::TreeWalker;
