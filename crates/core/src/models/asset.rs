use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::transaction::Transaction;

/// Profit/loss status of a tracked asset, derived from its profit rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// Profit rate above zero
    Profit,
    /// Profit rate below zero
    Loss,
    /// Break-even, or nothing invested yet
    #[default]
    Neutral,
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetStatus::Profit => write!(f, "Profit"),
            AssetStatus::Loss => write!(f, "Loss"),
            AssetStatus::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Input for registering a new asset in the portfolio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAsset {
    pub name: String,
    pub symbol: String,
    /// Contract address; leave empty for assets that are priced manually
    pub address: String,
    pub chain_id: String,
    pub is_custom: bool,
}

impl NewAsset {
    /// An asset picked from the price-source catalog.
    pub fn listed(
        name: impl Into<String>,
        symbol: impl Into<String>,
        address: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            address: address.into(),
            chain_id: chain_id.into(),
            is_custom: false,
        }
    }

    /// A manually entered asset with no on-chain lookup.
    pub fn custom(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            address: String::new(),
            chain_id: String::new(),
            is_custom: true,
        }
    }
}

/// One tracked crypto asset with its purchase history and valuation.
///
/// The fields `current_value`, `profit`, `profit_rate` and `status` are
/// derived from `current_price`, `holding_amount` and `investment_amount`.
/// They are only ever written by
/// [`ValuationService`](crate::services::valuation_service::ValuationService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoAsset {
    pub id: String,

    /// Network identifier used for price lookups (empty for custom assets)
    #[serde(default, deserialize_with = "string_or_number")]
    pub chain_id: String,

    pub name: String,

    pub symbol: String,

    /// Token contract address (empty means the asset cannot be auto-priced)
    #[serde(default)]
    pub address: String,

    /// Manually entered rather than selected from the catalog
    #[serde(default)]
    pub is_custom: bool,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub average_cost: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub holding_amount: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub investment_amount: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_value: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub profit: f64,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub profit_rate: f64,

    #[serde(default)]
    pub status: AssetStatus,

    /// Purchases in the order they were recorded
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl CryptoAsset {
    /// Create an asset with a fresh id and zeroed metrics.
    pub fn new(details: NewAsset) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            chain_id: details.chain_id.trim().to_string(),
            name: details.name.trim().to_string(),
            symbol: details.symbol.trim().to_string(),
            address: details.address.trim().to_string(),
            is_custom: details.is_custom,
            current_price: 0.0,
            average_cost: 0.0,
            holding_amount: 0.0,
            investment_amount: 0.0,
            current_value: 0.0,
            profit: 0.0,
            profit_rate: 0.0,
            status: AssetStatus::Neutral,
            transactions: Vec::new(),
        }
    }

    /// Whether the asset can be priced from the price source.
    pub fn has_address(&self) -> bool {
        !self.address.is_empty()
    }

    /// Whether every numeric field is finite, i.e. survives a JSON round-trip.
    pub fn has_finite_metrics(&self) -> bool {
        [
            self.current_price,
            self.average_cost,
            self.holding_amount,
            self.investment_amount,
            self.current_value,
            self.profit,
            self.profit_rate,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Chain ids arrive as numbers from the price source and in older backups.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null => String::new(),
    })
}

/// Older backups write NaN and Infinity as `null`; read those as zero.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Sort order for asset listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSortOrder {
    /// Order in which assets were added (default)
    Added,
    /// Alphabetical by symbol
    SymbolAsc,
    /// Highest unit price first
    PriceDesc,
    /// Highest average cost first
    AverageCostDesc,
    /// Largest holding first
    HoldingDesc,
    /// Largest investment first
    InvestmentDesc,
    /// Largest current value first
    ValueDesc,
    /// Largest absolute profit first
    ProfitDesc,
    /// Best profit rate first
    ProfitRateDesc,
    /// Worst profit rate first
    ProfitRateAsc,
}
