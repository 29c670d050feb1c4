//! Generic utility primitives with zero codemod knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `paths` - Lexical path normalization and depth counting
//! - `validation` - Configuration value validation helpers

pub mod io;
pub mod paths;
pub mod validation;
