use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::catalog::CatalogToken;
use crate::models::settings::Settings;
use super::traits::PriceSource;

const DEFAULT_BASE_URL: &str = "https://api.relay.link";
const PROVIDER: &str = "Relay";

/// Relay API client for the multi-chain token catalog and token prices.
///
/// - **Free**: No API key required.
/// - **Endpoints**: `/chains`, `/currencies/token/price?address={address}&chainId={chain}`
///
/// Prices are quoted in USD.
pub struct RelayProvider {
    client: Client,
    base_url: String,
}

impl RelayProvider {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_BASE_URL, 30)
    }

    /// Build from tracker settings (base URL and request timeout).
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_timeout(&settings.relay_base_url, settings.request_timeout_secs)
    }

    /// Point the client at another host (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, CoreError> {
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("{what} request failed with HTTP {status}"),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse {what} response: {e}"),
        })
    }
}

impl Default for RelayProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Relay API response types ────────────────────────────────────────

#[derive(Deserialize)]
struct ChainsResponse {
    #[serde(default)]
    chains: Vec<Chain>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Chain {
    id: u64,
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    /// Native gas token
    #[serde(default)]
    currency: Option<Currency>,
    #[serde(default)]
    solver_currencies: Vec<Currency>,
}

#[derive(Deserialize)]
struct Currency {
    #[serde(default)]
    id: String,
    name: String,
    symbol: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    decimals: Option<u8>,
}

#[derive(Deserialize)]
struct PriceResponse {
    price: Option<f64>,
}

impl Chain {
    fn tokens(self) -> Vec<CatalogToken> {
        let chain_id = self.id.to_string();
        let chain_display_name = self.display_name.unwrap_or_else(|| self.name.clone());
        let chain_name = self.name;

        self.currency
            .into_iter()
            .chain(self.solver_currencies)
            .map(|c| CatalogToken {
                id: c.id,
                name: c.name,
                symbol: c.symbol,
                address: c.address,
                decimals: c.decimals,
                chain_id: chain_id.clone(),
                chain_name: chain_name.clone(),
                chain_display_name: chain_display_name.clone(),
            })
            .collect()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceSource for RelayProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn list_assets(&self) -> Result<Vec<CatalogToken>, CoreError> {
        let url = format!("{}/chains", self.base_url);
        let resp: ChainsResponse = self.get_json(&url, &[], "chains").await?;

        let tokens: Vec<CatalogToken> =
            resp.chains.into_iter().flat_map(Chain::tokens).collect();
        tracing::debug!(count = tokens.len(), "Loaded Relay token catalog");
        Ok(tokens)
    }

    async fn get_price(&self, address: &str, chain_id: &str) -> Result<f64, CoreError> {
        let url = format!("{}/currencies/token/price", self.base_url);
        let resp: PriceResponse = self
            .get_json(&url, &[("address", address), ("chainId", chain_id)], "token price")
            .await?;

        resp.price.ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No price data for {address} on chain {chain_id}"),
        })
    }
}
