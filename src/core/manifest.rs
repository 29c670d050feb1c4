//! Manifest — the fixed, ordered list of files a run is scoped to.
//!
//! Entries are project-root relative. The optional `depth` is a legacy
//! declaration only; the engine always derives depth from the path and
//! reports disagreements instead of trusting the number.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::utils::validation;

/// One file the codemod should visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FileTargetEntry")]
pub struct FileTarget {
    pub path: String,
    /// Declared depth below the source root. Advisory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    /// Already migrated by hand; never read or written.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip: bool,
}

/// Accepts either `"src/a.tsx"` or `{ "path": "src/a.tsx", "depth": 1 }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FileTargetEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        depth: Option<usize>,
        #[serde(default)]
        skip: bool,
    },
}

impl From<FileTargetEntry> for FileTarget {
    fn from(entry: FileTargetEntry) -> Self {
        match entry {
            FileTargetEntry::Path(path) => FileTarget::new(path),
            FileTargetEntry::Detailed { path, depth, skip } => FileTarget { path, depth, skip },
        }
    }
}

impl FileTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            depth: None,
            skip: false,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    targets: Vec<FileTarget>,
}

impl Manifest {
    pub fn new(targets: Vec<FileTarget>) -> Self {
        Self { targets }
    }

    /// The files of the admin console that still import `@iconify/react`.
    ///
    /// Declared depths are the hand-maintained legacy values and several of
    /// them are off by one; they surface as depth warnings, not as paths.
    pub fn builtin() -> Self {
        let entry = |path: &str, depth: usize| FileTarget::new(path).with_depth(depth);

        Self::new(vec![
            entry("src/pages/auth/login.tsx", 3),
            entry("src/components/LanguageSwitcher.tsx", 1).skipped(),
            entry("src/pages/users/user-management.tsx", 3),
            entry("src/pages/users/tenant-management.tsx", 3),
            entry("src/components/ChangePasswordDialog.tsx", 1),
            entry("src/components/ui/MultiSelectAutocomplete.tsx", 2),
            entry("src/components/Layout.tsx", 1),
            entry("src/pages/gateway/gateway-manager.tsx", 3),
            entry("src/pages/chat/chat-interface.tsx", 3),
            entry("src/pages/gateway/components/RouterConfig.tsx", 4),
            entry("src/pages/chat/components/chat-history.tsx", 4),
            entry("src/pages/gateway/components/MCPServersConfig.tsx", 4),
            entry("src/pages/gateway/components/ToolsConfig.tsx", 4),
            entry("src/pages/gateway/components/ServersConfig.tsx", 4),
            entry("src/pages/gateway/config-versions.tsx", 3),
            entry("src/pages/gateway/components/OpenAPIImport.tsx", 4),
            entry("src/pages/chat/components/chat-message.tsx", 4),
        ])
    }

    pub fn targets(&self) -> &[FileTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileTarget> {
        self.targets.iter()
    }

    /// Reject empty paths and entries listed twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for target in &self.targets {
            let path = validation::require_non_empty(&target.path, "files[].path")?;
            let key = path.replace('\\', "/");
            let key = key.trim_start_matches("./");
            if !seen.insert(key.to_string()) {
                return Err(Error::config_invalid_value(
                    "files",
                    Some(target.path.clone()),
                    "file is listed more than once",
                ));
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a FileTarget;
    type IntoIter = std::slice::Iter<'a, FileTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}
