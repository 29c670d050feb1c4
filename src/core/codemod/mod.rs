//! Import substitution — move icon usage off a third-party module.
//!
//! Visits every manifest file, rewrites the named import to a default import
//! of the local replacement module (with a relative path derived from the
//! file's location), renames the JSX usage sites, and reports per file.

mod depth;
mod engine;
mod patterns;

pub use depth::{derive_depth, relative_import};
pub use engine::{rewrite_content, Codemod, ResolvedTarget, Rewrite, RunMode};
pub use patterns::{ImportPattern, UsagePattern};
