use std::sync::Mutex;

use crate::errors::CoreError;

use super::traits::PersistenceAdapter;

/// In-memory storage, for tests and for sessions that should not persist.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a value already saved.
    pub fn with_value(serialized: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(serialized.into())),
        }
    }

    /// The currently saved value.
    pub fn value(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn load(&self) -> Result<Option<String>, CoreError> {
        Ok(self.value())
    }

    fn save(&self, serialized: &str) -> Result<(), CoreError> {
        let mut value = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *value = Some(serialized.to_string());
        Ok(())
    }
}
