//! Folder scanning and per-file record capture

use chrono::NaiveDateTime;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::checksum::ChecksumAlgorithm;
use crate::core::error::{ReportError, Result};
use crate::core::record::{local_timestamp, FileRecord};

/// A visible regular file found in a folder listing, digest not yet computed
#[derive(Debug, Clone)]
pub struct ListedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: NaiveDateTime,
}

/// Collect the non-hidden regular files directly inside a folder
///
/// # Arguments
/// * `dir` - Folder to list (not recursed into)
///
/// # Returns
/// Files in directory-listing order
pub fn collect_files(dir: &Path) -> Result<Vec<ListedFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| ReportError::listing(dir, e))? {
        let entry = entry.map_err(|e| ReportError::listing(dir, e))?;
        let path = entry.path();

        // Follows symlinks, so links to directories drop out below
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !metadata.is_file() || is_hidden(&path, &metadata) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let modified = metadata
            .modified()
            .map_err(|e| ReportError::io(&path, e))?;
        files.push(ListedFile {
            name,
            size: metadata.len(),
            modified: local_timestamp(modified),
            path,
        });
    }

    Ok(files)
}

#[cfg(windows)]
fn is_hidden(_path: &Path, metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(path: &Path, _metadata: &Metadata) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Computes one `FileRecord` per listed file with a fixed algorithm
///
/// Files are processed one at a time on the calling thread. A read failure
/// on one file yields a record with an empty digest; the scan continues.
pub struct Scanner {
    algorithm: ChecksumAlgorithm,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl Scanner {
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        Self {
            algorithm,
            cancel_flag: None,
        }
    }

    /// Stop between files once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// Hash one listed file into a record
    pub fn record_for(&self, file: &ListedFile) -> FileRecord {
        let digest = match self.algorithm.digest_file(&file.path) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(file = %file.path.display(), error = %e, "checksum failed, leaving digest empty");
                String::new()
            }
        };
        FileRecord::new(file.name.clone(), file.size, file.modified, digest)
    }

    /// Scan a folder, returning records in listing order
    ///
    /// When cancelled, returns the records completed so far; check
    /// `is_cancelled` to tell a short scan from a complete one.
    pub fn scan(&self, dir: &Path) -> Result<Vec<FileRecord>> {
        let files = collect_files(dir)?;
        debug!(folder = %dir.display(), files = files.len(), algorithm = %self.algorithm, "scanning");

        let mut records = Vec::with_capacity(files.len());
        for file in &files {
            if self.is_cancelled() {
                debug!(completed = records.len(), "scan cancelled");
                break;
            }
            records.push(self.record_for(file));
        }

        Ok(records)
    }
}

/// Scan a folder with the given algorithm
pub fn scan(dir: &Path, algorithm: ChecksumAlgorithm) -> Result<Vec<FileRecord>> {
    Scanner::new(algorithm).scan(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_collect_files_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.txt", b"hello");
        fs::create_dir(temp_dir.path().join("subdir")).unwrap();
        write_file(&temp_dir.path().join("subdir"), "nested.txt", b"nested");

        let files = collect_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.txt");
        assert_eq!(files[0].size, 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_skips_dot_files_and_dir_links() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), ".hidden", b"secret");
        write_file(temp_dir.path(), "visible.bin", b"data");
        fs::create_dir(temp_dir.path().join("dir")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("dir"), temp_dir.path().join("dir_link")).unwrap();

        let files = collect_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["visible.bin"]);
    }

    #[test]
    fn test_scan_missing_folder() {
        let result = scan(Path::new("/nonexistent/folder/xyz123"), ChecksumAlgorithm::Crc32);
        assert!(matches!(result, Err(ReportError::PathNotFound(_))));
    }

    #[test]
    fn test_vanished_file_gets_empty_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "gone.bin", b"short lived");

        let files = collect_files(temp_dir.path()).unwrap();
        fs::remove_file(&path).unwrap();

        let record = Scanner::new(ChecksumAlgorithm::Md5).record_for(&files[0]);
        assert_eq!(record.name, "gone.bin");
        assert_eq!(record.size, 11);
        assert!(!record.has_digest());
    }

    #[test]
    fn test_cancelled_scan_stops_before_first_file() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.bin", b"a");
        write_file(temp_dir.path(), "b.bin", b"b");

        let flag = Arc::new(AtomicBool::new(true));
        let scanner = Scanner::new(ChecksumAlgorithm::Sha1).with_cancel_flag(flag);
        let records = scanner.scan(temp_dir.path()).unwrap();
        assert!(scanner.is_cancelled());
        assert!(records.is_empty());
    }
}
