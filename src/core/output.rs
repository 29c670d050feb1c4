//! Public output types for codemod runs.
//!
//! The engine returns these values; rendering them (text report or JSON
//! envelope) is the CLI's job.

use serde::Serialize;

// ============================================================================
// Per-file results
// ============================================================================

/// Why a single file could not be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// Reading or writing the file failed.
    Io,
    /// The resolved path is not under the source root, so no depth exists.
    OutsideSourceRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileError {
    pub kind: FileErrorKind,
    pub message: String,
}

impl FileError {
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: FileErrorKind::Io,
            message: message.into(),
        }
    }

    pub fn outside_source_root(message: impl Into<String>) -> Self {
        Self {
            kind: FileErrorKind::OutsideSourceRoot,
            message: message.into(),
        }
    }
}

/// Non-fatal observation about a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewriteWarning {
    /// The manifest declares a depth that disagrees with the file's location.
    DepthMismatch { declared: usize, derived: usize },
}

impl RewriteWarning {
    pub fn message(&self) -> String {
        match self {
            RewriteWarning::DepthMismatch { declared, derived } => format!(
                "declared depth {} ignored, file sits {} level(s) below the source root",
                declared, derived
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStatus {
    Updated,
    Unchanged,
    NotFound,
    Skipped,
    Error,
}

/// Outcome for one manifest entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    /// Manifest path, project-root relative.
    pub path: String,
    pub found: bool,
    /// Content differs after both rewrites.
    pub changed: bool,
    /// New content reached disk (false in dry runs).
    pub written: bool,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
    pub import_replacements: usize,
    pub usage_replacements: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RewriteWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FileError>,
}

impl RewriteResult {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            found: false,
            changed: false,
            written: false,
            skipped: false,
            depth: None,
            import_path: None,
            import_replacements: 0,
            usage_replacements: 0,
            warnings: Vec::new(),
            error: None,
        }
    }

    pub fn status(&self) -> RewriteStatus {
        if self.skipped {
            RewriteStatus::Skipped
        } else if !self.found {
            RewriteStatus::NotFound
        } else if self.error.is_some() {
            RewriteStatus::Error
        } else if self.changed {
            RewriteStatus::Updated
        } else {
            RewriteStatus::Unchanged
        }
    }
}

// ============================================================================
// Run summary
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn record(&mut self, status: RewriteStatus) {
        self.total += 1;
        match status {
            RewriteStatus::Updated => self.updated += 1,
            RewriteStatus::Unchanged => self.unchanged += 1,
            RewriteStatus::NotFound => self.not_found += 1,
            RewriteStatus::Skipped => self.skipped += 1,
            RewriteStatus::Error => self.errors += 1,
        }
    }
}

/// Everything a run produced, in manifest order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub dry_run: bool,
    pub results: Vec<RewriteResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn push(&mut self, result: RewriteResult) {
        self.summary.record(result.status());
        self.results.push(result);
    }

    pub fn summary_line(&self) -> String {
        let verb = if self.dry_run {
            "would be updated"
        } else {
            "updated"
        };
        format!(
            "{} of {} files {}",
            self.summary.updated, self.summary.total, verb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_prefers_skip_then_missing_then_error() {
        let mut result = RewriteResult::new("src/a.tsx");
        assert_eq!(result.status(), RewriteStatus::NotFound);

        result.found = true;
        assert_eq!(result.status(), RewriteStatus::Unchanged);

        result.changed = true;
        assert_eq!(result.status(), RewriteStatus::Updated);

        result.error = Some(FileError::io("permission denied"));
        assert_eq!(result.status(), RewriteStatus::Error);

        result.skipped = true;
        assert_eq!(result.status(), RewriteStatus::Skipped);
    }

    #[test]
    fn summary_line_counts_updates_against_total() {
        let mut report = RunReport::new(false);

        let mut updated = RewriteResult::new("src/a.tsx");
        updated.found = true;
        updated.changed = true;
        report.push(updated);
        report.push(RewriteResult::new("src/missing.tsx"));

        assert_eq!(report.summary.not_found, 1);
        assert_eq!(report.summary_line(), "1 of 2 files updated");

        report.dry_run = true;
        assert_eq!(report.summary_line(), "1 of 2 files would be updated");
    }

    #[test]
    fn serializes_camel_case_and_omits_empty_fields() {
        let mut result = RewriteResult::new("src/a.tsx");
        result.found = true;
        result.depth = Some(2);
        result.import_path = Some("../../components/LocalIcon".to_string());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["importPath"], "../../components/LocalIcon");
        assert_eq!(json["importReplacements"], 0);
        assert!(json.get("warnings").is_none());
        assert!(json.get("error").is_none());
    }
}
