// Public modules
pub mod codemod;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;

// Re-export common types for convenience
pub use codemod::{Codemod, RunMode};
pub use config::CodemodConfig;
pub use error::{Error, ErrorCode, Result};
pub use manifest::{FileTarget, Manifest};
pub use output::{
    FileError, FileErrorKind, RewriteResult, RewriteStatus, RewriteWarning, RunReport, RunSummary,
};
