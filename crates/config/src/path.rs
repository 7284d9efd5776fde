//! Environment variable naming for configuration paths.
//!
//! Responsibilities:
//! - Convert a mapping key from camel/pascal case into upper snake case.
//! - Render sequence indices as decimal segments.
//! - Join encoded segments onto an accumulated prefix.
//!
//! Does NOT handle:
//! - Looking variables up (see `source.rs`).
//! - Validating or uppercasing the namespace (see `engine.rs`).
//!
//! Invariants:
//! - Encoding is a pure function of its input; there are no error conditions.
//! - Keys that encode identically (`my-key`, `my.key`, `myKey`) share one variable.
//! - Existing separators map one-for-one, so `a--b` encodes to `A__B`.

use crate::constants::{PATH_SEPARATOR, REPLACED_KEY_CHARS};

/// One edge on the way from the root to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

impl PathSegment<'_> {
    pub fn encode(&self) -> String {
        match self {
            PathSegment::Key(key) => encode_key(key),
            PathSegment::Index(index) => encode_index(*index),
        }
    }
}

/// Split a dotted path (`servers.0.host`) into segments.
///
/// Parts written exactly as a decimal index become indices. Because `.` inside
/// a key encodes to the same separator, splitting a key on dots never changes
/// the resulting name.
pub fn parse_dotted(path: &str) -> Vec<PathSegment<'_>> {
    path.split('.')
        .map(|part| match part.parse::<usize>() {
            Ok(index) if encode_index(index) == part => PathSegment::Index(index),
            _ => PathSegment::Key(part),
        })
        .collect()
}

/// Encode a mapping key as an upper snake case segment.
///
/// Every ASCII capital after the first character starts a new word, so
/// `myKey` becomes `MY_KEY` and an acronym such as `URL` is spelled out as
/// `U_R_L`. `.` and `-` then become `_` and the result is uppercased.
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (i, c) in key.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push(PATH_SEPARATOR);
        }
        if REPLACED_KEY_CHARS.contains(&c) {
            out.push(PATH_SEPARATOR);
        } else {
            out.push(c);
        }
    }

    out.to_uppercase()
}

/// Encode a sequence index as a decimal segment.
pub fn encode_index(index: usize) -> String {
    index.to_string()
}

/// Append an encoded segment to a prefix.
pub fn join(prefix: &str, segment: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + 1 + segment.len());
    path.push_str(prefix);
    path.push(PATH_SEPARATOR);
    path.push_str(segment);
    path
}

/// Full variable name for a path under `namespace`.
///
/// The namespace is uppercased here so callers can pass it as the user typed it.
pub fn env_key(namespace: &str, segments: &[PathSegment<'_>]) -> String {
    segments
        .iter()
        .fold(namespace.to_uppercase(), |prefix, segment| {
            join(&prefix, &segment.encode())
        })
}
