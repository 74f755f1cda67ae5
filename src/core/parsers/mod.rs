//! Source parsers.
//!
//! - `js`: JavaScript/TypeScript parser (uses swc for AST generation)

pub mod js;
