//! Persisted command-line settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::checksum::ChecksumAlgorithm;

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Last scanned folder and checksum choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_path: Option<PathBuf>,
    /// Ordinal of the last used algorithm: 0 = CRC32, 1 = MD5, 2 = SHA-1
    pub checksum_type: u32,
}

impl Settings {
    /// Load settings from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).context("Failed to open settings file")?;
        let settings = serde_json::from_reader(file).context("Failed to parse settings file")?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            warn!(settings = %path.display(), error = %e, "ignoring settings file");
            Self::default()
        })
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).context("Failed to create settings file")?;
        serde_json::to_writer_pretty(file, self).context("Failed to write settings file")?;
        Ok(())
    }

    /// Stored algorithm; an unknown ordinal falls back to CRC32
    pub fn algorithm(&self) -> ChecksumAlgorithm {
        ChecksumAlgorithm::from_index(self.checksum_type).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to CRC32");
            ChecksumAlgorithm::Crc32
        })
    }

    /// Remember a completed scan
    pub fn record_scan(&mut self, folder: &Path, algorithm: ChecksumAlgorithm) {
        self.last_path = Some(folder.to_path_buf());
        self.checksum_type = algorithm.index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_FILE);

        let mut settings = Settings::default();
        settings.record_scan(Path::new("/data/photos"), ChecksumAlgorithm::Sha1);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.algorithm(), ChecksumAlgorithm::Sha1);
    }

    #[test]
    fn test_out_of_range_type_falls_back_to_crc32() {
        let settings = Settings {
            last_path: None,
            checksum_type: 7,
        };
        assert_eq!(settings.algorithm(), ChecksumAlgorithm::Crc32);
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, r#"{"checksum_type": 1}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.last_path, None);
        assert_eq!(settings.algorithm(), ChecksumAlgorithm::Md5);
    }
}
