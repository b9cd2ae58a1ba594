//! Folder scanning functionality

pub mod file_scanner;

pub use file_scanner::{collect_files, scan, ListedFile, Scanner};
