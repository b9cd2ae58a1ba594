//! Error taxonomy shared by scanning, naming and report writing

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Folder not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Nothing to export: the scan produced no records")]
    NoRecords,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    /// Wrap an I/O failure on `path` as a generic `Io` error
    pub fn io(path: &Path, source: io::Error) -> Self {
        ReportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classify a failure to list a folder
    pub fn listing(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ReportError::PathNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ReportError::PermissionDenied(path.to_path_buf()),
            _ => ReportError::io(path, source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_classification() {
        let path = Path::new("/some/folder");

        let err = ReportError::listing(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ReportError::PathNotFound(ref p) if p == path));

        let err = ReportError::listing(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ReportError::PermissionDenied(_)));

        let err = ReportError::listing(path, io::Error::from(io::ErrorKind::Other));
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn test_error_message_names_path() {
        let err = ReportError::io(Path::new("/tmp/a.bin"), io::Error::from(io::ErrorKind::Other));
        assert!(err.to_string().contains("/tmp/a.bin"));
    }
}
