use chrono::{DateTime, Utc};

use super::asset::{CryptoAsset, NewAsset};

/// A mutation of the portfolio. Applied by
/// [`PortfolioService::apply`](crate::services::portfolio_service::PortfolioService::apply).
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioCommand {
    AddAsset(NewAsset),
    RemoveAsset {
        id: String,
    },
    SetPrice {
        id: String,
        price: f64,
    },
    /// Buy `amount` units for `cost` USD in total.
    RecordPurchase {
        id: String,
        amount: f64,
        cost: f64,
        date: Option<DateTime<Utc>>,
    },
    /// Replace the whole portfolio (import).
    ReplaceAll(Vec<CryptoAsset>),
}

impl PortfolioCommand {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PortfolioCommand::AddAsset(_) => "add_asset",
            PortfolioCommand::RemoveAsset { .. } => "remove_asset",
            PortfolioCommand::SetPrice { .. } => "set_price",
            PortfolioCommand::RecordPurchase { .. } => "record_purchase",
            PortfolioCommand::ReplaceAll(_) => "replace_all",
        }
    }
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Id of the new asset
    AssetAdded(String),
    /// `false` when the id was not in the portfolio
    AssetRemoved(bool),
    PriceUpdated,
    /// Id of the new transaction
    PurchaseRecorded(String),
    /// Number of assets now in the portfolio
    PortfolioReplaced(usize),
}

impl CommandOutcome {
    /// Whether the portfolio changed and needs to be persisted.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, CommandOutcome::AssetRemoved(false))
    }
}
