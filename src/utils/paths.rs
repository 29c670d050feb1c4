//! Path helpers that never touch the filesystem.

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Resolve `.` and `..` components without following symlinks.
///
/// `..` at the start of a relative path is kept, since there is nothing to
/// pop; `..` directly under a root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// Number of directories between `base` and the directory containing `file`.
///
/// Both paths are normalized first. Returns `None` when `file` is not below
/// `base`.
pub fn depth_below(base: &Path, file: &Path) -> Option<usize> {
    let base = normalize(base);
    let file = normalize(file);
    let relative = file.strip_prefix(&base).ok()?;

    let segments = relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();

    // The last segment is the file itself.
    segments.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(
            normalize(Path::new("/repo/./src/pages/../components/Layout.tsx")),
            PathBuf::from("/repo/src/components/Layout.tsx")
        );
    }

    #[test]
    fn normalize_keeps_leading_parent_on_relative_paths() {
        assert_eq!(normalize(Path::new("../web/src")), PathBuf::from("../web/src"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn depth_below_counts_directories_only() {
        let base = Path::new("/repo/src");
        assert_eq!(depth_below(base, Path::new("/repo/src/App.tsx")), Some(0));
        assert_eq!(
            depth_below(base, Path::new("/repo/src/components/Layout.tsx")),
            Some(1)
        );
        assert_eq!(
            depth_below(base, Path::new("/repo/src/pages/gateway/components/ToolsConfig.tsx")),
            Some(3)
        );
    }

    #[test]
    fn depth_below_rejects_paths_outside_base() {
        let base = Path::new("/repo/src");
        assert_eq!(depth_below(base, Path::new("/repo/scripts/build.js")), None);
        assert_eq!(depth_below(base, Path::new("/repo/src/../README.md")), None);
        assert_eq!(depth_below(base, Path::new("/repo/src")), None);
    }

    #[test]
    fn depth_below_does_not_match_sibling_prefixes() {
        let base = Path::new("/repo/src");
        assert_eq!(depth_below(base, Path::new("/repo/src2/a.tsx")), None);
    }
}
