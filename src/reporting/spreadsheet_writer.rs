//! Spreadsheet (.xlsx) reports

use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use std::path::Path;

use super::staging::{write_all, write_new_file};
use super::text_writer::{checksum_header, HEADER_MODIFIED, HEADER_NAME, HEADER_SIZE};
use crate::core::checksum::ChecksumAlgorithm;
use crate::core::error::Result;
use crate::core::record::FileRecord;

/// Number format of the modified column
pub const DATETIME_NUM_FORMAT: &str = "dd.mm.yyyy hh:mm:ss";

/// Built-in "@" (text) number format
const TEXT_NUM_FORMAT_INDEX: u8 = 49;

/// Fixed widths of columns A to D
const COLUMN_WIDTHS: [f64; 4] = [80.0, 20.0, 40.0, 15.0];

const COL_NAME: u16 = 0;
const COL_MODIFIED: u16 = 1;
const COL_CHECKSUM: u16 = 2;
const COL_SIZE: u16 = 3;

/// Build the workbook for `records` and serialize it to bytes
///
/// Row 1 is a bold centered header; data starts at row 2 in scan order.
pub fn build_spreadsheet(records: &[FileRecord], algorithm_name: &str) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        worksheet.set_column_width(col, width)?;
    }

    let header_format = Format::new()
        .set_num_format_index(TEXT_NUM_FORMAT_INDEX)
        .set_bold()
        .set_align(FormatAlign::Center);
    worksheet.write_string_with_format(0, COL_NAME, HEADER_NAME, &header_format)?;
    worksheet.write_string_with_format(0, COL_MODIFIED, HEADER_MODIFIED, &header_format)?;
    worksheet.write_string_with_format(0, COL_CHECKSUM, checksum_header(algorithm_name), &header_format)?;
    worksheet.write_string_with_format(0, COL_SIZE, HEADER_SIZE, &header_format)?;

    let text_format = Format::new().set_num_format_index(TEXT_NUM_FORMAT_INDEX);
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    for (row, record) in (1u32..).zip(records) {
        worksheet.write_string_with_format(row, COL_NAME, &record.name, &text_format)?;
        worksheet.write_datetime_with_format(row, COL_MODIFIED, &record.modified, &datetime_format)?;
        worksheet.write_string_with_format(row, COL_CHECKSUM, &record.digest, &text_format)?;
        worksheet.write_number(row, COL_SIZE, record.size as f64)?;
    }

    workbook.save_to_buffer()
}

/// Write records to a new spreadsheet report at `output_path`
///
/// # Arguments
/// * `output_path` - Report path; must not exist yet
/// * `records` - Records in scan order; an empty slice writes only the header
/// * `algorithm` - Algorithm that produced the digests
pub fn write_spreadsheet_report(output_path: &Path, records: &[FileRecord], algorithm: ChecksumAlgorithm) -> Result<()> {
    let bytes = build_spreadsheet(records, algorithm.display_name())?;
    write_new_file(output_path, |staged| write_all(staged, output_path, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_build_spreadsheet_is_zip() {
        let bytes = build_spreadsheet(&[], "MD5").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_spreadsheet_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Отчет 1.xlsx");
        let modified = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let records = vec![FileRecord::new("a.bin", 7, modified, "1E3D0000")];

        write_spreadsheet_report(&path, &records, ChecksumAlgorithm::Crc32).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
