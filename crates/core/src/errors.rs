use thiserror::Error;

/// Unified error type for the entire dca-tracker-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// The `Display` text of each variant is shown to the user as-is.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Portfolio commands ──────────────────────────────────────────
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Asset validation failed: {0}")]
    Validation(String),

    // ── Price source ────────────────────────────────────────────────
    #[error("Failed to fetch price for {symbol}: {message}")]
    PriceFetch { symbol: String, message: String },

    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    // ── Import / Export / Storage ───────────────────────────────────
    #[error("Invalid import format: {0}")]
    InvalidImportFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip the query string (token address, chain id) from the embedded URL.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
