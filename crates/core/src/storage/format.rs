use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::models::asset::CryptoAsset;
use crate::models::snapshot::Snapshot;

/// Version string written into every export.
pub const CURRENT_VERSION: &str = "1.0";

/// Default file name prefix for exports: `crypto-dca-backup-<YYYY-MM-DD>.json`.
pub const BACKUP_FILE_PREFIX: &str = "crypto-dca-backup-";

/// Build an export snapshot of `assets` taken at `now`.
pub fn build_snapshot(assets: &[CryptoAsset], now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        crypto_list: assets.to_vec(),
        export_date: now,
        version: CURRENT_VERSION.to_string(),
    }
}

/// Pretty-printed JSON for an export file.
pub fn write_snapshot(snapshot: &Snapshot) -> Result<String, CoreError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
}

/// Suggested file name for an export made on `date`.
pub fn backup_filename(date: NaiveDate) -> String {
    format!("{BACKUP_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Parse and validate an export file. Returns the asset list it carries.
///
/// Layout:
/// ```text
/// {
///   "cryptoList": [ { "id", "name", "symbol", "transactions": [...], ... }, ... ],
///   "exportDate": "<RFC 3339>",
///   "version": "1.0"
/// }
/// ```
/// `exportDate` and `version` are informational and not required.
pub fn read_snapshot(raw: &[u8]) -> Result<Vec<CryptoAsset>, CoreError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| CoreError::InvalidImportFormat(format!("File is not valid UTF-8: {e}")))?;

    let root: Value = serde_json::from_str(text)
        .map_err(|e| CoreError::InvalidImportFormat(format!("Could not parse JSON: {e}")))?;

    let list = root
        .as_object()
        .and_then(|obj| obj.get("cryptoList"))
        .ok_or_else(|| CoreError::InvalidImportFormat("missing cryptoList array".into()))?;

    let entries = list
        .as_array()
        .ok_or_else(|| CoreError::InvalidImportFormat("cryptoList is not an array".into()))?;

    for (idx, entry) in entries.iter().enumerate() {
        validate_entry(idx, entry)?;
    }

    if let Some(version) = root.get("version").and_then(Value::as_str) {
        if version != CURRENT_VERSION {
            tracing::debug!(version, "Importing snapshot written by another format version");
        }
    }

    serde_json::from_value(list.clone()).map_err(|e| {
        CoreError::InvalidImportFormat(format!("cryptoList entries are malformed: {e}"))
    })
}

/// Every entry must be an object with non-empty string `id`, `name` and
/// `symbol`, and an array `transactions`.
fn validate_entry(idx: usize, entry: &Value) -> Result<(), CoreError> {
    let obj = entry.as_object().ok_or_else(|| {
        CoreError::InvalidImportFormat(format!("cryptoList[{idx}] is not an object"))
    })?;

    for field in ["id", "name", "symbol"] {
        if !non_empty_string(obj, field) {
            return Err(CoreError::InvalidImportFormat(format!(
                "cryptoList[{idx}] is missing a non-empty '{field}'"
            )));
        }
    }

    if !obj.get("transactions").is_some_and(Value::is_array) {
        return Err(CoreError::InvalidImportFormat(format!(
            "cryptoList[{idx}] has no 'transactions' array"
        )));
    }

    Ok(())
}

fn non_empty_string(obj: &Map<String, Value>, field: &str) -> bool {
    obj.get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}
