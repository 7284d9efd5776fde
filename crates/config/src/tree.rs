//! In-memory configuration tree.
//!
//! Responsibilities:
//! - Model a parsed configuration document as mappings, sequences, and scalars.
//! - Convert from `serde_yaml::Value` and `serde_json::Value` into the tree.
//! - Serialize the tree back out through any serde serializer.
//!
//! Does NOT handle:
//! - Reading or writing bytes (see `format.rs`).
//! - Applying overrides (see `walker.rs`).
//!
//! Invariants:
//! - Mapping keys are unique; re-inserting a key replaces its value in place.
//! - Mapping iteration order is insertion order, so output order matches input order.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::ConfigError;

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigTree {
    Mapping(Mapping),
    Sequence(Vec<ConfigTree>),
    Scalar(Scalar),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

/// Insertion-ordered mapping with unique string keys.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, ConfigTree>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing (and returning) any previous value under the same key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigTree) -> Option<ConfigTree> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigTree> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigTree> {
        self.entries.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigTree)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Two mappings are equal only if their entries match in order.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl IntoIterator for Mapping {
    type Item = (String, ConfigTree);
    type IntoIter = indexmap::map::IntoIter<String, ConfigTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, ConfigTree)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, ConfigTree)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ConfigTree {
    /// An empty mapping, the shape of an empty document.
    pub fn empty_mapping() -> Self {
        ConfigTree::Mapping(Mapping::new())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ConfigTree::Scalar(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigTree::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Follow mapping keys and sequence indices from this node.
    ///
    /// A segment addressing a sequence must parse as a decimal index.
    pub fn get_path(&self, segments: &[&str]) -> Option<&ConfigTree> {
        segments
            .iter()
            .try_fold(self, |node, segment| match node {
                ConfigTree::Mapping(mapping) => mapping.get(segment),
                ConfigTree::Sequence(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                ConfigTree::Scalar(_) => None,
            })
    }
}

impl From<Scalar> for ConfigTree {
    fn from(scalar: Scalar) -> Self {
        ConfigTree::Scalar(scalar)
    }
}

impl From<&str> for ConfigTree {
    fn from(value: &str) -> Self {
        ConfigTree::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for ConfigTree {
    fn from(value: String) -> Self {
        ConfigTree::Scalar(Scalar::String(value))
    }
}

impl From<i64> for ConfigTree {
    fn from(value: i64) -> Self {
        ConfigTree::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for ConfigTree {
    fn from(value: i32) -> Self {
        ConfigTree::Scalar(Scalar::Integer(i64::from(value)))
    }
}

impl From<f64> for ConfigTree {
    fn from(value: f64) -> Self {
        ConfigTree::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for ConfigTree {
    fn from(value: bool) -> Self {
        ConfigTree::Scalar(Scalar::Bool(value))
    }
}

impl From<Mapping> for ConfigTree {
    fn from(mapping: Mapping) -> Self {
        ConfigTree::Mapping(mapping)
    }
}

impl From<Vec<ConfigTree>> for ConfigTree {
    fn from(items: Vec<ConfigTree>) -> Self {
        ConfigTree::Sequence(items)
    }
}

// =============================================================================
// YAML conversion
// =============================================================================

impl TryFrom<serde_yaml::Value> for ConfigTree {
    type Error = ConfigError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => ConfigTree::Scalar(Scalar::Null),
            Value::Bool(b) => ConfigTree::Scalar(Scalar::Bool(b)),
            Value::Number(n) => ConfigTree::Scalar(yaml_number(&n)),
            Value::String(s) => ConfigTree::Scalar(Scalar::String(s)),
            Value::Sequence(items) => ConfigTree::Sequence(
                items
                    .into_iter()
                    .map(ConfigTree::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (key, value) in map {
                    mapping.insert(yaml_key(key)?, ConfigTree::try_from(value)?);
                }
                ConfigTree::Mapping(mapping)
            }
            // Tags carry no meaning for substitution; keep the tagged value.
            Value::Tagged(tagged) => ConfigTree::try_from(tagged.value)?,
        })
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::Unsigned(u)
    } else {
        n.as_f64()
            .map(Scalar::Float)
            .unwrap_or_else(|| Scalar::String(n.to_string()))
    }
}

/// Render a YAML mapping key as the string it would be written as.
fn yaml_key(key: serde_yaml::Value) -> Result<String, ConfigError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        other @ (Value::Sequence(_) | Value::Mapping(_)) => Err(ConfigError::UnsupportedKey {
            key: format!("{:?}", other),
        }),
    }
}

// =============================================================================
// JSON conversion
// =============================================================================

impl From<serde_json::Value> for ConfigTree {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ConfigTree::Scalar(Scalar::Null),
            Value::Bool(b) => ConfigTree::Scalar(Scalar::Bool(b)),
            Value::Number(n) => ConfigTree::Scalar(json_number(&n)),
            Value::String(s) => ConfigTree::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                ConfigTree::Sequence(items.into_iter().map(ConfigTree::from).collect())
            }
            Value::Object(map) => ConfigTree::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigTree::from(v)))
                    .collect(),
            ),
        }
    }
}

fn json_number(n: &serde_json::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::Unsigned(u)
    } else {
        n.as_f64()
            .map(Scalar::Float)
            .unwrap_or_else(|| Scalar::String(n.to_string()))
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigTree::Mapping(mapping) => {
                let mut map = serializer.serialize_map(Some(mapping.len()))?;
                for (key, value) in mapping.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ConfigTree::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigTree::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Unsigned(u) => serializer.serialize_u64(*u),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}
