use std::path::Path;

use crate::utils::paths;

/// Directory levels between `source_root` and the folder holding `file`.
///
/// `None` when the file does not live under the source root.
pub fn derive_depth(source_root: &Path, file: &Path) -> Option<usize> {
    paths::depth_below(source_root, file)
}

/// Import specifier that reaches `module` from a file `depth` levels deep.
pub fn relative_import(depth: usize, module: &str) -> String {
    format!("{}{}", "../".repeat(depth), module)
}
