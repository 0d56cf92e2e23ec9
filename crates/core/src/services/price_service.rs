use futures::future::join_all;

use crate::errors::CoreError;
use crate::models::catalog::CatalogToken;
use crate::providers::catalog::dedupe_tokens;
use crate::providers::traits::PriceSource;

/// An asset to be priced: identity plus the on-chain coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTarget {
    pub asset_id: String,
    pub symbol: String,
    pub address: String,
    pub chain_id: String,
}

/// Fetches prices and the token catalog from a [`PriceSource`].
///
/// Every price handed back has been checked to be finite and non-negative,
/// and every failure is reported as [`CoreError::PriceFetch`].
pub struct PriceService {
    source: Box<dyn PriceSource>,
}

impl PriceService {
    pub fn new(source: Box<dyn PriceSource>) -> Self {
        Self { source }
    }

    /// Name of the underlying source (for logs).
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the current unit price of a single asset.
    pub async fn fetch_price(&self, target: &PriceTarget) -> Result<f64, CoreError> {
        if target.address.is_empty() {
            return Err(CoreError::PriceFetch {
                symbol: target.symbol.clone(),
                message: "asset has no contract address".into(),
            });
        }

        let price = self
            .source
            .get_price(&target.address, &target.chain_id)
            .await
            .map_err(|e| match e {
                CoreError::PriceFetch { .. } => e,
                other => CoreError::PriceFetch {
                    symbol: target.symbol.clone(),
                    message: other.to_string(),
                },
            })?;

        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::PriceFetch {
                symbol: target.symbol.clone(),
                message: format!(
                    "{} returned an invalid price: {price} (must be finite and non-negative)",
                    self.source.name()
                ),
            });
        }

        Ok(price)
    }

    /// Fetch prices for all targets concurrently and wait for every request.
    ///
    /// Results come back in the order of `targets`; one failed request does
    /// not affect the others.
    pub async fn fetch_prices(
        &self,
        targets: &[PriceTarget],
    ) -> Vec<(PriceTarget, Result<f64, CoreError>)> {
        tracing::debug!(
            source = self.source.name(),
            count = targets.len(),
            "Fetching prices"
        );

        let futures = targets.iter().map(|target| async move {
            let result = self.fetch_price(target).await;
            (target.clone(), result)
        });

        join_all(futures).await
    }

    /// Fetch the token catalog with exact duplicates removed.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogToken>, CoreError> {
        let tokens = self.source.list_assets().await?;
        Ok(dedupe_tokens(tokens))
    }
}
