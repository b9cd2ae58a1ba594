//! Snapshot of one scanned file

use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use std::time::SystemTime;

/// Format of the modified timestamp in text reports
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y  %H:%M:%S";

/// One scanned file: name, size, local modification time and digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub size: u64,
    pub modified: NaiveDateTime,
    /// Empty when the file could not be read
    pub digest: String,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, size: u64, modified: NaiveDateTime, digest: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
            digest: digest.into(),
        }
    }

    /// Whether the checksum was computed successfully
    pub fn has_digest(&self) -> bool {
        !self.digest.is_empty()
    }

    pub fn modified_text(&self) -> String {
        self.modified.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Convert filesystem time to local wall-clock time at second precision
pub fn local_timestamp(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local().trunc_subsecs(0)
}
