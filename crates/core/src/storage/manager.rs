use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

use super::format;
use super::traits::PersistenceAdapter;

/// High-level storage operations: persist/restore the working copy of the
/// portfolio and produce/consume export files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the portfolio for the persistence adapter (bare JSON array of assets).
    pub fn encode(portfolio: &Portfolio) -> Result<String, CoreError> {
        serde_json::to_string(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Parse what [`encode`](Self::encode) produced.
    pub fn decode(serialized: &str) -> Result<Portfolio, CoreError> {
        serde_json::from_str(serialized)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize portfolio: {e}")))
    }

    /// Write the portfolio through the adapter.
    pub fn save(adapter: &dyn PersistenceAdapter, portfolio: &Portfolio) -> Result<(), CoreError> {
        let serialized = Self::encode(portfolio)?;
        adapter.save(&serialized)
    }

    /// Read the portfolio through the adapter.
    ///
    /// Never fails: nothing saved yet, an unreadable store, or corrupt data
    /// all yield an empty portfolio (the latter two are logged).
    pub fn load(adapter: &dyn PersistenceAdapter) -> Portfolio {
        let serialized = match adapter.load() {
            Ok(Some(s)) => s,
            Ok(None) => return Portfolio::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved portfolio, starting empty");
                return Portfolio::default();
            }
        };

        match Self::decode(&serialized) {
            Ok(portfolio) => portfolio,
            Err(e) => {
                tracing::warn!(error = %e, "Saved portfolio is corrupt, starting empty");
                Portfolio::default()
            }
        }
    }

    /// Pretty JSON export of the portfolio taken at `now`.
    pub fn export_to_json(portfolio: &Portfolio, now: DateTime<Utc>) -> Result<String, CoreError> {
        let snapshot = format::build_snapshot(&portfolio.assets, now);
        format::write_snapshot(&snapshot)
    }

    /// Parse and validate an export file into a portfolio.
    pub fn import_from_bytes(raw: &[u8]) -> Result<Portfolio, CoreError> {
        format::read_snapshot(raw).map(Portfolio::new)
    }

    /// Write an export file to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_to_file(
        portfolio: &Portfolio,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), CoreError> {
        let json = Self::export_to_json(portfolio, Utc::now())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read an export file from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn import_from_file(path: impl AsRef<std::path::Path>) -> Result<Portfolio, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::import_from_bytes(&bytes)
    }
}
