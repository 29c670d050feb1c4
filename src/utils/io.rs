//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// Readers always see either the old content or the new content, never a
/// partial write. Symlinks are followed so the link survives and its target
/// is the file that changes; an existing file keeps its permissions.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let target = if path.exists() {
        fs::canonicalize(path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("{} (resolve)", operation)))
        })?
    } else {
        path.to_path_buf()
    };

    let parent = target.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", target.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = target.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", target.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation)))
    })?;

    let finish = || -> std::io::Result<()> {
        if let Ok(metadata) = fs::metadata(&target) {
            fs::set_permissions(&tmp_path, metadata.permissions())?;
        }
        fs::rename(&tmp_path, &target)
    };

    if let Err(e) = finish() {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::internal_io(
            e.to_string(),
            Some(format!("{} (rename)", operation)),
        ));
    }

    Ok(())
}

/// Human-readable description of an IO error built by this module.
pub fn describe_io_error(err: &Error) -> String {
    let cause = err
        .details
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or(&err.message);

    match err.details.get("context").and_then(|v| v.as_str()) {
        Some(context) => format!("{}: {}", context, cause),
        None => cause.to_string(),
    }
}
