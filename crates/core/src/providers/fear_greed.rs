use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::sentiment::FearGreedReading;
use crate::models::settings::Settings;

const DEFAULT_BASE_URL: &str = "https://api.alternative.me";
const PROVIDER: &str = "Fear & Greed";

/// Relays the alternative.me crypto Fear & Greed index.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/fng/?limit={n}`, newest reading first.
pub struct FearGreedProvider {
    client: Client,
    base_url: String,
}

impl FearGreedProvider {
    pub fn new() -> Self {
        Self::build(DEFAULT_BASE_URL, 30)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::build(&settings.fear_greed_base_url, settings.request_timeout_secs)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn build(base_url: &str, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Latest index reading.
    pub async fn current(&self) -> Result<FearGreedReading, CoreError> {
        self.history(1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: "Empty index response".into(),
            })
    }

    /// The last `limit` daily readings, newest first.
    pub async fn history(&self, limit: u32) -> Result<Vec<FearGreedReading>, CoreError> {
        let url = format!("{}/fng/", self.base_url);
        let limit = limit.max(1).to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[("limit", limit.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Index request failed with HTTP {status}"),
            });
        }

        let body: IndexResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse index response: {e}"),
        })?;

        body.data.into_iter().map(IndexEntry::into_reading).collect()
    }
}

impl Default for FearGreedProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── alternative.me response types (numbers are sent as strings) ─────

#[derive(Deserialize)]
struct IndexResponse {
    #[serde(default)]
    data: Vec<IndexEntry>,
}

#[derive(Deserialize)]
struct IndexEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

impl IndexEntry {
    fn into_reading(self) -> Result<FearGreedReading, CoreError> {
        let value: u8 = self.value.trim().parse().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid index value '{}': {e}", self.value),
        })?;

        let secs: i64 = self.timestamp.trim().parse().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid index timestamp '{}': {e}", self.timestamp),
        })?;
        let timestamp = DateTime::from_timestamp(secs, 0).ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Index timestamp out of range: {secs}"),
        })?;

        Ok(FearGreedReading {
            value,
            classification: self.value_classification,
            timestamp,
        })
    }
}
