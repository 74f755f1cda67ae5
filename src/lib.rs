//! minerr - error message extraction for minErr-style JavaScript code
//!
//! minerr scans JavaScript/TypeScript sources for calls to an error factory
//! (`minErr` by default), strips each call's message template, and collects every
//! `namespace → code → message` mapping into a compact JSON registry. The
//! factory's own declaration can be swapped for a replacement that builds
//! documentation URLs instead of carrying messages.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`extract`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: The extraction pass (scan, finalize, registry)
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
