//! Plain-text implementation of the record repository.
//!
//! One `<difficulty>: <name>: <attempts>` line per record, UTF-8.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Result, error::Error, game::Records, ports::RecordRepository};

/// Default records file, relative to the working directory.
pub const DEFAULT_RECORDS_PATH: &str = "records.txt";

/// File-backed record repository.
#[derive(Debug, Clone)]
pub struct TextRecordRepository {
    path: PathBuf,
}

impl TextRecordRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TextRecordRepository {
    fn default() -> Self {
        Self::new(DEFAULT_RECORDS_PATH)
    }
}

impl RecordRepository for TextRecordRepository {
    fn load(&self) -> Result<Records> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Records::parse(&content)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(Records::new()),
            Err(source) => Err(Error::Io {
                operation: format!("read records file {:?}", self.path),
                source,
            }),
        }
    }

    fn save(&self, records: &Records) -> Result<()> {
        fs::write(&self.path, records.to_text()).map_err(|source| Error::Io {
            operation: format!("write records file {:?}", self.path),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::game::Difficulty;

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = TextRecordRepository::new(temp_dir.path().join("records.txt"));
        assert!(repo.load().expect("Failed to load").is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("records.txt");
        let repo = TextRecordRepository::new(&path);

        let mut records = Records::new();
        records.submit(Difficulty::Easy, "ada", 4);
        records.submit(Difficulty::Hard, "bo", 10);
        repo.save(&records).expect("Failed to save");

        assert_eq!(
            fs::read_to_string(&path).expect("Failed to read"),
            "easy: ada: 4\nhard: bo: 10"
        );
        assert_eq!(repo.load().expect("Failed to load"), records);
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = TextRecordRepository::new("/invalid_dir_12345/records.txt");
        assert!(matches!(repo.save(&Records::new()), Err(Error::Io { .. })));
    }
}
