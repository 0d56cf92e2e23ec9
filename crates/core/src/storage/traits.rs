use crate::errors::CoreError;

/// Durable storage for the serialized portfolio (one value, overwritten on save).
///
/// Both operations are best-effort from the tracker's point of view: it
/// logs failures and carries on with its in-memory state.
pub trait PersistenceAdapter: Send + Sync {
    /// Read the last saved value, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, CoreError>;

    /// Overwrite the saved value.
    fn save(&self, serialized: &str) -> Result<(), CoreError>;
}
