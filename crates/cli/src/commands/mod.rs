//! Command implementations for envsub.

pub mod completions;
pub mod key;
pub mod render;
