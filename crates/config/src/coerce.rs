//! Override value coercion.
//!
//! Responsibilities:
//! - Turn a raw override string into a typed tree value using the document's grammar.
//! - Fall back to the literal string whenever the grammar rejects the input.
//!
//! Does NOT handle:
//! - Checking the coerced type against the value it replaces (mismatches are accepted).
//!
//! Invariants:
//! - `coerce` never fails; free text always survives as a plain string.
//! - Blank input stays a string rather than becoming null.
//! - Input that only parses to null because it is a comment stays a string.
//! - A string result must be the trimmed input itself or the body of a quoted
//!   input; anything else (a trailing ` #comment`, a tag) keeps the raw text.

use crate::format::Format;
use crate::tree::{ConfigTree, Scalar};

/// Spellings the YAML core schema reads as null.
const NULL_TOKENS: [&str; 4] = ["~", "null", "Null", "NULL"];

/// Converts raw override strings into tree values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueCoercer {
    format: Format,
}

impl ValueCoercer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Parse `raw` as a value in this coercer's format, or keep it verbatim.
    pub fn coerce(&self, raw: &str) -> ConfigTree {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ConfigTree::from(raw);
        }

        match self.format.parse_value(raw) {
            Ok(ConfigTree::Scalar(Scalar::Null)) if !is_null_token(trimmed) => {
                ConfigTree::from(raw)
            }
            Ok(ConfigTree::Scalar(Scalar::String(text)))
                if text != trimmed && !is_quoted(trimmed) =>
            {
                ConfigTree::from(raw)
            }
            Ok(value) => value,
            Err(_) => ConfigTree::from(raw),
        }
    }
}

fn is_null_token(text: &str) -> bool {
    NULL_TOKENS.contains(&text)
}

/// A single- or double-quoted scalar with nothing after the closing quote.
fn is_quoted(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
}
