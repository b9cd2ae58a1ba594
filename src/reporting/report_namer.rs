//! Sequential report file naming
//!
//! Reports are named `Отчет <N>.txt` / `Отчет <N>.xlsx`. Each extension is
//! numbered independently; the next number is one past the largest found.

use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::scanner::file_scanner::collect_files;

/// Leading part of every report file name
pub const REPORT_PREFIX: &str = "Отчет ";

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Text,
    Spreadsheet,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => ".txt",
            ReportFormat::Spreadsheet => ".xlsx",
        }
    }

    /// File name of report number `number` in this format
    pub fn file_name(self, number: u64) -> String {
        format!("{}{}{}", REPORT_PREFIX, number, self.extension())
    }

    /// Report number encoded in `file_name`, if it is a report of this format
    ///
    /// Only exact `Отчет <digits><ext>` names match. Digits that overflow
    /// count as 0.
    pub fn report_number(self, file_name: &str) -> Option<u64> {
        let digits = file_name
            .strip_prefix(REPORT_PREFIX)?
            .strip_suffix(self.extension())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(digits.parse().unwrap_or(0))
    }
}

/// Next free report path for `format` in `dir`
///
/// # Arguments
/// * `dir` - Destination folder, listed afresh on every call
/// * `format` - Report format; selects which numbered series to continue
///
/// # Returns
/// `dir` joined with `Отчет <max+1><ext>`, numbering from 1
pub fn next_report_path(dir: &Path, format: ReportFormat) -> Result<PathBuf> {
    let max = collect_files(dir)?
        .iter()
        .filter_map(|file| format.report_number(&file.name))
        .max()
        .unwrap_or(0);

    Ok(dir.join(format.file_name(max.saturating_add(1))))
}
