//! Fixed-width plain text reports

use std::path::Path;

use super::staging::{write_all, write_new_file};
use crate::core::checksum::ChecksumAlgorithm;
use crate::core::error::Result;
use crate::core::record::FileRecord;

pub const HEADER_NAME: &str = "Filename";
pub const HEADER_MODIFIED: &str = "Last edit date time";
pub const HEADER_SIZE: &str = "File size";

const MIN_NAME_WIDTH: usize = 50;
const MIN_MODIFIED_WIDTH: usize = 25;
const MIN_SIZE_WIDTH: usize = 15;

/// Header label of the digest column, e.g. `Checksum (MD5)`
pub fn checksum_header(algorithm_name: &str) -> String {
    format!("Checksum ({})", algorithm_name)
}

/// Widest cell in a column plus one space of separation, never below `min`
fn column_width<'a>(min: usize, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count() + 1)
        .fold(min, usize::max)
}

/// Render records as a text table
///
/// Name, timestamp and digest are left-aligned; size is right-aligned.
/// Columns grow to fit their longest cell, so nothing is truncated.
pub fn render_text_report(records: &[FileRecord], algorithm_name: &str, max_digest_len: usize) -> String {
    let checksum_label = checksum_header(algorithm_name);
    let modified: Vec<String> = records.iter().map(FileRecord::modified_text).collect();
    let sizes: Vec<String> = records.iter().map(|r| r.size.to_string()).collect();

    let w_name = column_width(
        MIN_NAME_WIDTH,
        std::iter::once(HEADER_NAME).chain(records.iter().map(|r| r.name.as_str())),
    );
    let w_modified = column_width(
        MIN_MODIFIED_WIDTH,
        std::iter::once(HEADER_MODIFIED).chain(modified.iter().map(String::as_str)),
    );
    let w_checksum = column_width(
        max_digest_len,
        std::iter::once(checksum_label.as_str()).chain(records.iter().map(|r| r.digest.as_str())),
    );
    let w_size = column_width(
        MIN_SIZE_WIDTH,
        std::iter::once(HEADER_SIZE).chain(sizes.iter().map(String::as_str)),
    );

    let mut out = String::new();
    let mut push_line = |name: &str, modified: &str, checksum: &str, size: &str| {
        out.push_str(&format!(
            "{:<w_name$}{:<w_modified$}{:<w_checksum$}{:>w_size$}\n",
            name, modified, checksum, size,
        ));
    };

    push_line(HEADER_NAME, HEADER_MODIFIED, &checksum_label, HEADER_SIZE);
    for ((record, modified), size) in records.iter().zip(&modified).zip(&sizes) {
        push_line(&record.name, modified, &record.digest, size);
    }

    out
}

/// Write records to a new text report at `output_path`
///
/// # Arguments
/// * `output_path` - Report path; must not exist yet
/// * `records` - Records in scan order; an empty slice writes only the header
/// * `algorithm` - Algorithm that produced the digests
pub fn write_text_report(output_path: &Path, records: &[FileRecord], algorithm: ChecksumAlgorithm) -> Result<()> {
    let content = render_text_report(records, algorithm.display_name(), algorithm.max_digest_len());
    write_new_file(output_path, |staged| write_all(staged, output_path, content.as_bytes()))
}
