//! The extraction engine.
//!
//! ## Module Structure
//!
//! - `data`: source location types shared by issues and reporting
//! - `parsers`: swc-based source parser
//! - `eval`: static string evaluator
//! - `classify`: instance and definition predicates
//! - `namespace`: namespace resolution for instances
//! - `registry`: namespace → code → message accumulator
//! - `scan`: post-order scanner collecting candidates
//! - `finalize`: resolution, tree mutation and text edits
//! - `definition`: replacement factory source
//! - `edit`: byte-range text edits
//! - `files`: source file discovery
//! - `pass`: one complete pass execution

pub mod classify;
pub mod data;
pub mod definition;
pub mod edit;
pub mod eval;
pub mod files;
pub mod finalize;
pub mod namespace;
pub mod parsers;
pub mod pass;
pub mod registry;
pub mod scan;

pub use data::{SourceContext, SourceLocation};
pub use finalize::Finalized;
pub use pass::MinErrPass;
pub use registry::Registry;
