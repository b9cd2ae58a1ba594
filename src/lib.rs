//! Checksum Report Library
//!
//! Scans a folder, checksums every visible file with CRC32, MD5 or SHA-1,
//! and exports the results as sequentially numbered text or spreadsheet reports.

pub mod config;
pub mod core;
pub mod reporting;
pub mod scanner;

pub use crate::core::checksum;
pub use crate::reporting::report_namer;
pub use crate::scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::checksum::ChecksumAlgorithm;
    pub use crate::core::error::{ReportError, Result};
    pub use crate::core::record::{FileRecord, TIMESTAMP_FORMAT};
    pub use crate::reporting::export::export_report;
    pub use crate::reporting::report_namer::{next_report_path, ReportFormat};
    pub use crate::reporting::spreadsheet_writer::write_spreadsheet_report;
    pub use crate::reporting::text_writer::{render_text_report, write_text_report};
    pub use crate::scanner::file_scanner::{collect_files, scan, ListedFile, Scanner};
}
