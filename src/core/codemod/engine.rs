//! Codemod engine — apply both rewrite rules to every manifest file.
//!
//! Given a validated `CodemodConfig`, the engine:
//! 1. Refuses to start if the source root is missing
//! 2. Resolves each target and derives its depth from where it actually lives
//! 3. Rewrites the import statement and the usage sites
//! 4. Writes changed files back atomically (or only reports, in a dry run)
//!
//! Files are processed one at a time and in isolation. A missing or
//! unreadable file is recorded in its own result and the run carries on.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::depth::{derive_depth, relative_import};
use super::patterns::{ImportPattern, UsagePattern};
use crate::config::CodemodConfig;
use crate::error::{Error, Result};
use crate::manifest::{FileTarget, Manifest};
use crate::output::{FileError, RewriteResult, RewriteWarning, RunReport};
use crate::utils::{io, paths};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    DryRun,
}

/// Content after both rules ran, with per-rule counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub import_replacements: usize,
    pub usage_replacements: usize,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        self.import_replacements > 0 || self.usage_replacements > 0
    }
}

/// Run the import rule, then the usage rule, over one file's text.
pub fn rewrite_content(
    imports: &ImportPattern,
    usage: &UsagePattern,
    content: &str,
    import_path: &str,
) -> Rewrite {
    let (content, import_replacements) = imports.apply(content, import_path);
    let (content, usage_replacements) = usage.apply(&content);

    Rewrite {
        content,
        import_replacements,
        usage_replacements,
    }
}

/// Where a manifest entry points and what import path it would get.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTarget {
    pub path: String,
    #[serde(skip)]
    pub absolute: PathBuf,
    pub exists: bool,
    pub skip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RewriteWarning>,
}

#[derive(Debug, Clone)]
pub struct Codemod {
    root: PathBuf,
    source_root: PathBuf,
    replacement_module: String,
    imports: ImportPattern,
    usage: UsagePattern,
}

impl Codemod {
    /// Validate the config and check the source root before anything runs.
    pub fn new(root: &Path, config: &CodemodConfig) -> Result<Self> {
        config.validate()?;

        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| {
                    Error::internal_io(e.to_string(), Some("resolve working directory".to_string()))
                })?
                .join(root)
        };
        let root = paths::normalize(&root);
        let source_root = config.source_root(&root);

        if !source_root.is_dir() {
            return Err(Error::source_root_not_found(
                source_root.display().to_string(),
            ));
        }

        Ok(Self {
            root,
            source_root,
            replacement_module: config.replacement_module.trim().to_string(),
            imports: ImportPattern::new(
                config.import_source.trim(),
                config.binding.trim(),
                config.replacement_binding.trim(),
            )?,
            usage: UsagePattern::new(
                config.binding.trim(),
                config.replacement_binding.trim(),
                config.usage_mode,
            )?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Locate a target without reading it.
    pub fn resolve(&self, target: &FileTarget) -> ResolvedTarget {
        let absolute = paths::normalize(&self.root.join(target.path.trim()));
        let depth = derive_depth(&self.source_root, &absolute);
        let import_path = depth.map(|d| relative_import(d, &self.replacement_module));

        let mut warnings = Vec::new();
        if let (Some(declared), Some(derived)) = (target.depth, depth) {
            if declared != derived {
                warnings.push(RewriteWarning::DepthMismatch { declared, derived });
            }
        }

        ResolvedTarget {
            path: target.path.clone(),
            exists: absolute.is_file(),
            absolute,
            skip: target.skip,
            depth,
            declared_depth: target.depth,
            import_path,
            warnings,
        }
    }

    pub fn resolve_all(&self, manifest: &Manifest) -> Vec<ResolvedTarget> {
        manifest.iter().map(|target| self.resolve(target)).collect()
    }

    /// Process every manifest entry in order. Never fails as a whole.
    pub fn run(&self, manifest: &Manifest, mode: RunMode) -> RunReport {
        let dry_run = mode == RunMode::DryRun;
        log_status!(
            "iconswap",
            "Processing {} file(s) under {}{}",
            manifest.len(),
            self.source_root.display(),
            if dry_run { " (dry run)" } else { "" }
        );

        let mut report = RunReport::new(dry_run);
        for target in manifest {
            report.push(self.process(target, mode));
        }
        report
    }

    /// Rewrite a single target.
    pub fn process(&self, target: &FileTarget, mode: RunMode) -> RewriteResult {
        let resolved = self.resolve(target);

        let mut result = RewriteResult::new(&resolved.path);
        result.found = resolved.exists;
        result.skipped = resolved.skip;
        result.depth = resolved.depth;
        result.import_path = resolved.import_path.clone();
        result.warnings = resolved.warnings;

        if resolved.skip || !resolved.exists {
            return result;
        }

        let Some(import_path) = resolved.import_path else {
            result.error = Some(FileError::outside_source_root(format!(
                "{} is not under {}",
                resolved.absolute.display(),
                self.source_root.display()
            )));
            return result;
        };

        let content = match io::read_file(&resolved.absolute, &format!("read {}", target.path)) {
            Ok(content) => content,
            Err(err) => {
                result.error = Some(FileError::io(io::describe_io_error(&err)));
                return result;
            }
        };

        let rewrite = rewrite_content(&self.imports, &self.usage, &content, &import_path);
        result.import_replacements = rewrite.import_replacements;
        result.usage_replacements = rewrite.usage_replacements;
        result.changed = rewrite.changed();

        if result.changed && mode == RunMode::Write {
            match io::write_file_atomic(
                &resolved.absolute,
                &rewrite.content,
                &format!("write {}", target.path),
            ) {
                Ok(()) => result.written = true,
                Err(err) => result.error = Some(FileError::io(io::describe_io_error(&err))),
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UsageMode;
    use crate::output::{FileErrorKind, RewriteStatus};
    use std::fs;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/components")).unwrap();
        dir
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(files: &[&str]) -> CodemodConfig {
        CodemodConfig {
            manifest: Manifest::new(files.iter().map(|f| FileTarget::new(*f)).collect()),
            ..CodemodConfig::default()
        }
    }

    #[test]
    fn rewrite_content_counts_each_rule() {
        let config = CodemodConfig::default();
        let imports =
            ImportPattern::new(&config.import_source, &config.binding, &config.replacement_binding)
                .unwrap();
        let usage =
            UsagePattern::new(&config.binding, &config.replacement_binding, UsageMode::AnyAttributes)
                .unwrap();

        let rewrite = rewrite_content(
            &imports,
            &usage,
            "import { Icon } from '@iconify/react';\n<Icon icon=\"a\" /><Icon icon=\"b\" />",
            "../components/LocalIcon",
        );

        assert!(rewrite.changed());
        assert_eq!(rewrite.import_replacements, 1);
        assert_eq!(rewrite.usage_replacements, 2);
    }

    #[test]
    fn missing_source_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Codemod::new(dir.path(), &config_for(&[])).unwrap_err();
        assert_eq!(err.code.as_str(), "source.root_not_found");
    }

    #[test]
    fn invalid_config_is_rejected_before_run() {
        let dir = project();
        let config = CodemodConfig {
            binding: String::new(),
            ..config_for(&[])
        };
        let err = Codemod::new(dir.path(), &config).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn rewrites_scenario_file_at_depth_three() {
        let dir = project();
        let rel = "src/pages/gateway/components/ToolsConfig.tsx";
        write(
            dir.path(),
            rel,
            "import { Icon } from '@iconify/react';\nconst x = 1;\n<Icon icon=\"mdi:home\" />",
        );

        let config = config_for(&[rel]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::Write);

        let result = &report.results[0];
        assert_eq!(result.status(), RewriteStatus::Updated);
        assert_eq!(result.depth, Some(3));
        assert!(result.written);
        assert_eq!(
            fs::read_to_string(dir.path().join(rel)).unwrap(),
            "import LocalIcon from '../../../components/LocalIcon';\nconst x = 1;\n<LocalIcon icon=\"mdi:home\" />"
        );
        assert_eq!(report.summary_line(), "1 of 1 files updated");
    }

    #[test]
    fn usage_only_file_is_still_written() {
        let dir = project();
        write(dir.path(), "src/components/Layout.tsx", "<Icon icon=\"mdi:home\" />");

        let config = config_for(&["src/components/Layout.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let result = codemod.process(&config.manifest.targets()[0], RunMode::Write);

        assert!(result.changed);
        assert!(result.written);
        assert_eq!(result.import_replacements, 0);
        assert_eq!(result.usage_replacements, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/components/Layout.tsx")).unwrap(),
            "<LocalIcon icon=\"mdi:home\" />"
        );
    }

    #[test]
    fn file_without_patterns_is_left_alone() {
        let dir = project();
        let original = "export const Button = () => <IconButton size=\"sm\" />;\n";
        write(dir.path(), "src/components/Button.tsx", original);
        let path = dir.path().join("src/components/Button.tsx");
        let modified_before = fs::metadata(&path).unwrap().modified().unwrap();

        let config = config_for(&["src/components/Button.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::Write);

        assert_eq!(report.results[0].status(), RewriteStatus::Unchanged);
        assert!(!report.results[0].written);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified_before);
        assert_eq!(report.summary_line(), "0 of 1 files updated");
    }

    #[test]
    fn missing_file_does_not_affect_others() {
        let dir = project();
        write(dir.path(), "src/a/One.tsx", "<Icon icon=\"a\" />");
        write(dir.path(), "src/b/Two.tsx", "<Icon icon=\"b\" />");

        let config = config_for(&["src/a/One.tsx", "src/missing/Gone.tsx", "src/b/Two.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::Write);

        let statuses: Vec<_> = report.results.iter().map(|r| r.status()).collect();
        assert_eq!(
            statuses,
            vec![
                RewriteStatus::Updated,
                RewriteStatus::NotFound,
                RewriteStatus::Updated
            ]
        );
        assert_eq!(report.summary.not_found, 1);
        assert_eq!(report.summary.updated, 2);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let dir = project();
        write(
            dir.path(),
            "src/pages/auth/login.tsx",
            "import { Icon } from '@iconify/react';\n<Icon icon=\"lucide:user\" />\n",
        );

        let config = config_for(&["src/pages/auth/login.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();

        let first = codemod.run(&config.manifest, RunMode::Write);
        let after_first = fs::read_to_string(dir.path().join("src/pages/auth/login.tsx")).unwrap();
        let second = codemod.run(&config.manifest, RunMode::Write);
        let after_second = fs::read_to_string(dir.path().join("src/pages/auth/login.tsx")).unwrap();

        assert_eq!(first.summary.updated, 1);
        assert_eq!(second.summary.updated, 0);
        assert_eq!(second.results[0].status(), RewriteStatus::Unchanged);
        assert_eq!(after_first, after_second);
        assert!(after_first.starts_with("import LocalIcon from '../../components/LocalIcon';\n"));
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let dir = project();
        let original = "<Icon icon=\"a\" />";
        write(dir.path(), "src/components/Layout.tsx", original);

        let config = config_for(&["src/components/Layout.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::DryRun);

        assert!(report.dry_run);
        assert!(report.results[0].changed);
        assert!(!report.results[0].written);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/components/Layout.tsx")).unwrap(),
            original
        );
        assert_eq!(report.summary_line(), "1 of 1 files would be updated");
    }

    #[test]
    fn declared_depth_is_checked_not_trusted() {
        let dir = project();
        write(dir.path(), "src/pages/auth/login.tsx", "<Icon icon=\"a\" />");

        let target = FileTarget::new("src/pages/auth/login.tsx").with_depth(3);
        let codemod = Codemod::new(dir.path(), &config_for(&[])).unwrap();
        let resolved = codemod.resolve(&target);

        assert_eq!(resolved.depth, Some(2));
        assert_eq!(resolved.declared_depth, Some(3));
        assert_eq!(
            resolved.import_path.as_deref(),
            Some("../../components/LocalIcon")
        );
        assert_eq!(
            resolved.warnings,
            vec![RewriteWarning::DepthMismatch {
                declared: 3,
                derived: 2
            }]
        );
    }

    #[test]
    fn skipped_entries_are_not_touched() {
        let dir = project();
        let original = "<Icon icon=\"a\" />";
        write(dir.path(), "src/components/LanguageSwitcher.tsx", original);

        let manifest =
            Manifest::new(vec![FileTarget::new("src/components/LanguageSwitcher.tsx").skipped()]);
        let codemod = Codemod::new(dir.path(), &config_for(&[])).unwrap();
        let report = codemod.run(&manifest, RunMode::Write);

        assert_eq!(report.results[0].status(), RewriteStatus::Skipped);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/components/LanguageSwitcher.tsx")).unwrap(),
            original
        );
    }

    #[test]
    fn file_outside_source_root_is_a_per_file_error() {
        let dir = project();
        write(dir.path(), "scripts/legacy.tsx", "<Icon icon=\"a\" />");

        let manifest = Manifest::new(vec![FileTarget::new("scripts/legacy.tsx")]);
        let codemod = Codemod::new(dir.path(), &config_for(&[])).unwrap();
        let report = codemod.run(&manifest, RunMode::Write);

        let result = &report.results[0];
        assert_eq!(result.status(), RewriteStatus::Error);
        assert_eq!(
            result.error.as_ref().map(|e| e.kind),
            Some(FileErrorKind::OutsideSourceRoot)
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("scripts/legacy.tsx")).unwrap(),
            "<Icon icon=\"a\" />"
        );
    }

    #[test]
    fn directory_in_manifest_counts_as_not_found() {
        let dir = project();
        let manifest = Manifest::new(vec![FileTarget::new("src/components")]);
        let codemod = Codemod::new(dir.path(), &config_for(&[])).unwrap();

        let report = codemod.run(&manifest, RunMode::Write);
        assert_eq!(report.results[0].status(), RewriteStatus::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_an_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = project();
        write(dir.path(), "src/components/Locked.tsx", "<Icon icon=\"a\" />");
        write(dir.path(), "src/components/Open.tsx", "<Icon icon=\"b\" />");
        let locked = dir.path().join("src/components/Locked.tsx");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; nothing to assert there.
        if fs::read_to_string(&locked).is_ok() {
            return;
        }

        let config = config_for(&["src/components/Locked.tsx", "src/components/Open.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::Write);

        assert_eq!(report.results[0].status(), RewriteStatus::Error);
        assert_eq!(
            report.results[0].error.as_ref().map(|e| e.kind),
            Some(FileErrorKind::Io)
        );
        assert_eq!(report.results[1].status(), RewriteStatus::Updated);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_file_is_an_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = project();
        write(dir.path(), "src/locked/Frozen.tsx", "<Icon icon=\"a\" />");
        write(dir.path(), "src/components/Open.tsx", "<Icon icon=\"b\" />");
        let locked_dir = dir.path().join("src/locked");
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores permission bits; nothing to assert there.
        if fs::write(locked_dir.join("canary"), "").is_ok() {
            fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let config = config_for(&["src/locked/Frozen.tsx", "src/components/Open.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::Write);

        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();

        let frozen = &report.results[0];
        assert_eq!(frozen.status(), RewriteStatus::Error);
        assert_eq!(frozen.error.as_ref().map(|e| e.kind), Some(FileErrorKind::Io));
        assert!(!frozen.written);
        assert_eq!(
            fs::read_to_string(locked_dir.join("Frozen.tsx")).unwrap(),
            "<Icon icon=\"a\" />"
        );
        assert_eq!(report.results[1].status(), RewriteStatus::Updated);
        assert_eq!(report.summary.errors, 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_entry_updates_the_real_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = project();
        write(dir.path(), "shared/Real.tsx", "<Icon icon=\"a\" />");
        let real = dir.path().join("shared/Real.tsx");
        fs::set_permissions(&real, fs::Permissions::from_mode(0o600)).unwrap();
        let link = dir.path().join("src/components/Layout.tsx");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let config = config_for(&["src/components/Layout.tsx"]);
        let codemod = Codemod::new(dir.path(), &config).unwrap();
        let report = codemod.run(&config.manifest, RunMode::Write);

        assert_eq!(report.results[0].status(), RewriteStatus::Updated);
        assert_eq!(report.results[0].depth, Some(1));
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(&real).unwrap(),
            "<LocalIcon icon=\"a\" />"
        );
        let mode = fs::metadata(&real).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
