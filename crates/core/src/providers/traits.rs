use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::catalog::CatalogToken;

/// Trait abstraction for the remote price/catalog API.
///
/// The tracker only consumes this interface; the Relay API client is one
/// implementation and tests plug in their own.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Every token available across all supported chains, including each
    /// chain's native gas token.
    async fn list_assets(&self) -> Result<Vec<CatalogToken>, CoreError>;

    /// Current USD unit price of the token at `address` on `chain_id`.
    async fn get_price(&self, address: &str, chain_id: &str) -> Result<f64, CoreError>;
}
