//! Core data types used across all pipeline phases.

pub mod source;

pub use source::{SourceContext, SourceLocation};
