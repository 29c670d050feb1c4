//! Plain-text rendering of command output.
//!
//! One line per file with a status symbol, then a summary line. This is the
//! default output; `--json` bypasses it.

use iconswap::output::{RewriteResult, RewriteStatus};
use iconswap::Error;

pub trait TextReport {
    fn render_text(&self) -> String;
}

fn symbol(status: RewriteStatus) -> &'static str {
    match status {
        RewriteStatus::Updated => "✓",
        RewriteStatus::Unchanged | RewriteStatus::Skipped => "-",
        RewriteStatus::NotFound => "!",
        RewriteStatus::Error => "✗",
    }
}

/// Status line for one file, plus indented warning lines.
pub fn result_lines(result: &RewriteResult, dry_run: bool) -> Vec<String> {
    let status = result.status();
    let label = match status {
        RewriteStatus::Updated if dry_run => "would update",
        RewriteStatus::Updated => "updated",
        RewriteStatus::Unchanged => "unchanged",
        RewriteStatus::NotFound => "file not found",
        RewriteStatus::Skipped => "skipped (already handled)",
        RewriteStatus::Error => "error",
    };

    let mut line = format!("{} {}: {}", symbol(status), label, result.path);
    if let Some(error) = &result.error {
        line.push_str(&format!(" ({})", error.message));
    }

    let mut lines = vec![line];
    lines.extend(
        result
            .warnings
            .iter()
            .map(|warning| format!("    warning: {}", warning.message())),
    );
    lines
}

pub fn render_error(err: &Error) -> String {
    let mut out = format!("error: {}", err.message);

    if let Some(problem) = err.details.get("problem").and_then(|v| v.as_str()) {
        let key = err
            .details
            .get("key")
            .or_else(|| err.details.get("field"))
            .and_then(|v| v.as_str())
            .unwrap_or("value");
        out.push_str(&format!("\n  {}: {}", key, problem));
    } else if let Some(cause) = err.details.get("error").and_then(|v| v.as_str()) {
        out.push_str(&format!("\n  {}", cause));
    }

    for hint in &err.hints {
        out.push_str(&format!("\n  hint: {}", hint.message));
    }

    out
}
