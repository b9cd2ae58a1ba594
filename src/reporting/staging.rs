//! Write-then-rename for report files

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::core::error::{ReportError, Result};

/// Create `path` from content written into a hidden staging file
///
/// The staging file lives next to `path` and is renamed into place only
/// after `write` succeeds. An existing file at `path` is never replaced.
pub(crate) fn write_new_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".report-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| ReportError::io(path, e))?;

    write(&mut staged)?;
    staged
        .as_file()
        .sync_all()
        .map_err(|e| ReportError::io(path, e))?;

    staged
        .persist_noclobber(path)
        .map_err(|e| ReportError::io(path, e.error))?;
    Ok(())
}

pub(crate) fn write_all(staged: &mut NamedTempFile, path: &Path, bytes: &[u8]) -> Result<()> {
    io::Write::write_all(staged, bytes).map_err(|e| ReportError::io(path, e))
}
