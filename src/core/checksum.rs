//! Checksum algorithms offered for a scan
//!
//! The set is closed: CRC32, MD5 and SHA-1. Each variant streams a file
//! through its accumulator and renders a fixed-width digest string.

use md5::Md5;
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::error::{ReportError, Result};

const READ_BUFFER_SIZE: usize = 8192;

/// Checksum algorithm selected for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Crc32,
    Md5,
    Sha1,
}

impl ChecksumAlgorithm {
    /// Algorithms in ordinal order
    pub const ALL: [ChecksumAlgorithm; 3] = [
        ChecksumAlgorithm::Crc32,
        ChecksumAlgorithm::Md5,
        ChecksumAlgorithm::Sha1,
    ];

    /// Look up an algorithm by its persisted ordinal
    pub fn from_index(index: u32) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| ReportError::UnsupportedAlgorithm(format!("index {}", index)))
    }

    /// Ordinal used when persisting the selection
    pub fn index(self) -> u32 {
        match self {
            ChecksumAlgorithm::Crc32 => 0,
            ChecksumAlgorithm::Md5 => 1,
            ChecksumAlgorithm::Sha1 => 2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Crc32 => "CRC32",
            ChecksumAlgorithm::Md5 => "MD5",
            ChecksumAlgorithm::Sha1 => "SHA-1",
        }
    }

    /// Longest digest string this algorithm renders, in characters
    pub fn max_digest_len(self) -> usize {
        match self {
            ChecksumAlgorithm::Crc32 => 8,
            ChecksumAlgorithm::Md5 => 32,
            ChecksumAlgorithm::Sha1 => 40,
        }
    }

    /// Compute the digest of a file's full content
    ///
    /// # Arguments
    /// * `path` - Path to the file
    ///
    /// # Returns
    /// Uppercase zero-padded hex for CRC32, lowercase hex for MD5 and SHA-1
    pub fn digest_file(self, path: &Path) -> Result<String> {
        let mut file = File::open(path).map_err(|e| ReportError::io(path, e))?;
        let mut accumulator = Accumulator::new(self);
        let mut buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            let bytes_read = file.read(&mut buffer).map_err(|e| ReportError::io(path, e))?;
            if bytes_read == 0 {
                break;
            }
            accumulator.update(&buffer[..bytes_read]);
        }

        Ok(accumulator.finish())
    }

    /// Compute the digest of an in-memory buffer
    pub fn digest_bytes(self, data: &[u8]) -> String {
        let mut accumulator = Accumulator::new(self);
        accumulator.update(data);
        accumulator.finish()
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "crc32" => Ok(ChecksumAlgorithm::Crc32),
            "md5" => Ok(ChecksumAlgorithm::Md5),
            "sha1" | "sha-1" => Ok(ChecksumAlgorithm::Sha1),
            _ => Err(ReportError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Running state for one file's read loop
enum Accumulator {
    Crc32(crc32fast::Hasher),
    Md5(Md5),
    Sha1(Sha1),
}

impl Accumulator {
    fn new(algorithm: ChecksumAlgorithm) -> Self {
        match algorithm {
            ChecksumAlgorithm::Crc32 => Accumulator::Crc32(crc32fast::Hasher::new()),
            ChecksumAlgorithm::Md5 => Accumulator::Md5(Md5::new()),
            ChecksumAlgorithm::Sha1 => Accumulator::Sha1(Sha1::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Accumulator::Crc32(hasher) => hasher.update(data),
            Accumulator::Md5(hasher) => hasher.update(data),
            Accumulator::Sha1(hasher) => hasher.update(data),
        }
    }

    fn finish(self) -> String {
        match self {
            Accumulator::Crc32(hasher) => format!("{:08X}", hasher.finalize()),
            Accumulator::Md5(hasher) => format!("{:x}", hasher.finalize()),
            Accumulator::Sha1(hasher) => format!("{:x}", hasher.finalize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_known_digests() {
        assert_eq!(ChecksumAlgorithm::Crc32.digest_bytes(b"123456789"), "CBF43926");
        assert_eq!(
            ChecksumAlgorithm::Md5.digest_bytes(b"abc"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            ChecksumAlgorithm::Sha1.digest_bytes(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_crc32_is_zero_padded() {
        // CRC32 of empty input is 0
        assert_eq!(ChecksumAlgorithm::Crc32.digest_bytes(b""), "00000000");
    }

    #[test]
    fn test_digest_file_streams_across_buffer_boundary() {
        let data: Vec<u8> = (0..READ_BUFFER_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&data).unwrap();
        temp_file.flush().unwrap();

        for algorithm in ChecksumAlgorithm::ALL {
            let from_file = algorithm.digest_file(temp_file.path()).unwrap();
            assert_eq!(from_file, algorithm.digest_bytes(&data));
            assert_eq!(from_file.len(), algorithm.max_digest_len());
        }
    }

    #[test]
    fn test_digest_missing_file_is_io_error() {
        let result = ChecksumAlgorithm::Md5.digest_file(Path::new("/nonexistent/file/xyz.bin"));
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }

    #[test]
    fn test_index_round_trip_and_out_of_range() {
        for algorithm in ChecksumAlgorithm::ALL {
            assert_eq!(ChecksumAlgorithm::from_index(algorithm.index()).unwrap(), algorithm);
        }
        assert!(matches!(
            ChecksumAlgorithm::from_index(3),
            Err(ReportError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("CRC32".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Crc32);
        assert_eq!("sha-1".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha1);
        assert!("sha256".parse::<ChecksumAlgorithm>().is_err());
    }
}
