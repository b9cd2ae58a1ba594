//! Report naming and writing

pub mod export;
pub mod report_namer;
pub mod spreadsheet_writer;
mod staging;
pub mod text_writer;

pub use export::export_report;
pub use report_namer::{next_report_path, ReportFormat};
pub use spreadsheet_writer::write_spreadsheet_report;
pub use text_writer::write_text_report;
