//! In-memory record repository for testing.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{Result, game::Records, ports::RecordRepository};

/// Repository that keeps records in memory.
///
/// Clones share the same storage, so a test can hand one clone to the code
/// under test and inspect the other afterwards.
///
/// # Examples
///
/// ```
/// use numguess::adapters::InMemoryRecordRepository;
/// use numguess::game::{Difficulty, Records};
/// use numguess::ports::RecordRepository;
///
/// let repo = InMemoryRecordRepository::new();
/// let mut records = Records::new();
/// records.submit(Difficulty::Medium, "ada", 6);
/// repo.save(&records)?;
/// assert_eq!(repo.load()?.best(Difficulty::Medium, "ada"), Some(6));
/// # Ok::<(), numguess::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordRepository {
    storage: Arc<Mutex<Records>>,
    saves: Arc<Mutex<usize>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records.
    pub fn with_records(records: Records) -> Self {
        Self {
            storage: Arc::new(Mutex::new(records)),
            saves: Arc::default(),
        }
    }

    /// Number of save calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn load(&self) -> Result<Records> {
        Ok(self
            .storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, records: &Records) -> Result<()> {
        *self.storage.lock().unwrap_or_else(PoisonError::into_inner) = records.clone();
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
