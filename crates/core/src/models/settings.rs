use serde::{Deserialize, Serialize};

/// Runtime configuration for the tracker and its HTTP adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the Relay API (token catalog and prices).
    pub relay_base_url: String,

    /// Base URL of the Fear & Greed index API.
    pub fear_greed_base_url: String,

    /// Per-request timeout for outgoing HTTP calls, in seconds.
    pub request_timeout_secs: u64,

    /// Quote currency of every price (display only, no conversion happens).
    pub quote_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            relay_base_url: "https://api.relay.link".to_string(),
            fear_greed_base_url: "https://api.alternative.me".to_string(),
            request_timeout_secs: 30,
            quote_currency: "USD".to_string(),
        }
    }
}
