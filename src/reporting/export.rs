//! Export of scanned records as a numbered report

use std::path::{Path, PathBuf};
use tracing::info;

use super::report_namer::{next_report_path, ReportFormat};
use super::spreadsheet_writer::write_spreadsheet_report;
use super::text_writer::write_text_report;
use crate::core::checksum::ChecksumAlgorithm;
use crate::core::error::{ReportError, Result};
use crate::core::record::FileRecord;

/// Write `records` as the next numbered report of `format` in `dir`
///
/// # Returns
/// Path of the written report. `NoRecords` if there is nothing to export,
/// in which case the folder is left untouched.
pub fn export_report(
    records: &[FileRecord],
    dir: &Path,
    format: ReportFormat,
    algorithm: ChecksumAlgorithm,
) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(ReportError::NoRecords);
    }

    let path = next_report_path(dir, format)?;
    match format {
        ReportFormat::Text => write_text_report(&path, records, algorithm)?,
        ReportFormat::Spreadsheet => write_spreadsheet_report(&path, records, algorithm)?,
    }

    info!(report = %path.display(), records = records.len(), "report written");
    Ok(path)
}
