use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::CryptoAsset;

/// Export file layout: the full asset list plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub crypto_list: Vec<CryptoAsset>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}
