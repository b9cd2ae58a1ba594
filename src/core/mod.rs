//! Core types: checksum algorithms, file records and errors

pub mod checksum;
pub mod error;
pub mod record;

pub use checksum::ChecksumAlgorithm;
pub use error::{ReportError, Result};
pub use record::FileRecord;
