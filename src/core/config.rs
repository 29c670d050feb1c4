//! Codemod configuration (`iconswap.json`).
//!
//! Every key is optional; missing keys fall back to the values the admin
//! console migration was written for. The config is built once per run and
//! handed to the engine by reference.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::utils::{io, paths, validation};

pub const CONFIG_FILE_NAME: &str = "iconswap.json";

/// Which JSX opening tags count as a usage site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageMode {
    /// `<Icon` followed by any whitespace.
    #[default]
    AnyAttributes,
    /// `<Icon` followed by whitespace and then `icon=`.
    IconAttribute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodemodConfig {
    /// Import alias root, relative to the project root.
    pub source_dir: String,
    /// Module that replaces the third-party import, relative to `source_dir`.
    pub replacement_module: String,
    /// Module specifier being removed.
    pub import_source: String,
    /// Named binding imported from `import_source`.
    pub binding: String,
    /// Default-export binding of the replacement module.
    pub replacement_binding: String,
    pub usage_mode: UsageMode,
    #[serde(rename = "files")]
    pub manifest: Manifest,
}

impl Default for CodemodConfig {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            replacement_module: "components/LocalIcon".to_string(),
            import_source: "@iconify/react".to_string(),
            binding: "Icon".to_string(),
            replacement_binding: "LocalIcon".to_string(),
            usage_mode: UsageMode::default(),
            manifest: Manifest::builtin(),
        }
    }
}

/// Where a config came from, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    File(String),
    Builtin,
}

impl CodemodConfig {
    pub fn from_json(raw: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::config_invalid_json(origin, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let raw = io::read_file(path, &format!("read config {}", origin))?;
        Self::from_json(&raw, &origin)
    }

    /// Explicit path wins, then `<root>/iconswap.json`, then the built-in defaults.
    pub fn discover(root: &Path, explicit: Option<&str>) -> Result<(Self, ConfigSource)> {
        if let Some(explicit) = explicit {
            let path = paths::expand_tilde(explicit);
            let config = Self::load(&path)?;
            return Ok((config, ConfigSource::File(path.display().to_string())));
        }

        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            let config = Self::load(&candidate)?;
            return Ok((config, ConfigSource::File(candidate.display().to_string())));
        }

        Ok((Self::default(), ConfigSource::Builtin))
    }

    pub fn validate(&self) -> Result<()> {
        validation::require_non_empty(&self.source_dir, "sourceDir")?;
        validation::require_relative_module(&self.replacement_module, "replacementModule")?;
        validation::require_non_empty(&self.import_source, "importSource")?;
        let binding = validation::require_identifier(&self.binding, "binding")?;
        let replacement =
            validation::require_identifier(&self.replacement_binding, "replacementBinding")?;

        if binding == replacement {
            return Err(Error::config_invalid_value(
                "replacementBinding",
                Some(replacement.to_string()),
                "must differ from binding",
            ));
        }

        self.manifest.validate()
    }

    pub fn source_root(&self, root: &Path) -> PathBuf {
        paths::normalize(&root.join(self.source_dir.trim()))
    }
}
