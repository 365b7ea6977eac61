//! Persistence of the opponent's Q-table.
//!
//! Tables are written as MessagePack via rmp_serde, wrapped in a small
//! versioned envelope.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error, q_learning::q_table::QTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub table: QTable,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn new(table: QTable) -> Self {
        Self {
            version: Self::VERSION,
            table,
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let reader = BufReader::new(file);

        let saved: Self =
            rmp_serde::decode::from_read(reader).map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        if saved.version != Self::VERSION {
            return Err(Error::SerializationContext {
                operation: "load Q-table".to_string(),
                message: format!(
                    "unsupported save format version {}, expected {}",
                    saved.version,
                    Self::VERSION
                ),
            });
        }
        if !saved.table.is_well_formed() {
            return Err(Error::SerializationContext {
                operation: "load Q-table".to_string(),
                message: "value buffer does not match table capacity".to_string(),
            });
        }

        Ok(saved)
    }
}

/// Load a table from `path` if a usable one is saved there.
///
/// A missing file, an unreadable or corrupt file, and a table whose capacity
/// differs from `capacity` all yield `None`; callers start from zeros. The
/// game should start even when the save is broken, so nothing is surfaced
/// beyond a log line.
pub fn load_saved<P: AsRef<Path>>(path: P, capacity: usize) -> Option<QTable> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no saved Q-table, starting from zeros");
        return None;
    }

    match SavedQTable::load_from_file(path) {
        Ok(saved) if saved.table.capacity() == capacity => {
            tracing::info!(
                path = %path.display(),
                visited = saved.table.visited(),
                "Q-table loaded"
            );
            Some(saved.table)
        }
        Ok(saved) => {
            tracing::warn!(
                path = %path.display(),
                found = saved.table.capacity(),
                expected = capacity,
                "saved Q-table has a different capacity, starting from zeros"
            );
            None
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not read saved Q-table, starting from zeros"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_roundtrip_preserves_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("q_table.msgpack");

        let mut table = QTable::new(20);
        table.set(4, 7, -0.1);
        table.set(19, 0, 12.5);
        SavedQTable::new(table.clone())
            .save_to_file(&path)
            .expect("Failed to save");

        let loaded = SavedQTable::load_from_file(&path).expect("Failed to load");
        assert_eq!(loaded.version, SavedQTable::VERSION);
        assert_eq!(loaded.table, table);
    }

    #[test]
    fn test_missing_file_is_not_loaded() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert_eq!(load_saved(temp_dir.path().join("absent.msgpack"), 30), None);
    }

    #[test]
    fn test_matching_table_is_loaded() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("q_table.msgpack");
        let mut table = QTable::new(6);
        table.set(2, 3, -0.1);
        SavedQTable::new(table.clone())
            .save_to_file(&path)
            .expect("Failed to save");

        assert_eq!(load_saved(&path, 6), Some(table));
    }

    #[test]
    fn test_corrupt_file_is_not_loaded() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("corrupt.msgpack");
        fs::write(&path, b"definitely not messagepack").expect("Failed to write");

        assert!(SavedQTable::load_from_file(&path).is_err());
        assert_eq!(load_saved(&path, 8), None);
    }

    #[test]
    fn test_capacity_mismatch_is_not_loaded() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("small.msgpack");
        let mut table = QTable::new(4);
        table.set(1, 1, 5.0);
        SavedQTable::new(table)
            .save_to_file(&path)
            .expect("Failed to save");

        assert_eq!(load_saved(&path, 16), None);
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let saved = SavedQTable::new(QTable::new(2));
        let result = saved.save_to_file(Path::new("/invalid_dir_12345/q_table.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
