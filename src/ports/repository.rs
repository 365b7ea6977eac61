//! Repository port for best-attempt records.

use crate::{Result, game::Records};

/// Port for persisting and loading [`Records`].
///
/// # Examples
///
/// ```no_run
/// use numguess::adapters::TextRecordRepository;
/// use numguess::game::Difficulty;
/// use numguess::ports::RecordRepository;
///
/// let repo = TextRecordRepository::new("records.txt");
/// let mut records = repo.load()?;
/// if records.submit(Difficulty::Easy, "ada", 4) {
///     repo.save(&records)?;
/// }
/// # Ok::<(), numguess::Error>(())
/// ```
pub trait RecordRepository {
    /// Load all records.
    ///
    /// # Errors
    ///
    /// Returns an error if existing storage cannot be read. Missing storage
    /// is not an error and yields empty records.
    fn load(&self) -> Result<Records>;

    /// Replace the stored records with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save(&self, records: &Records) -> Result<()>;
}
