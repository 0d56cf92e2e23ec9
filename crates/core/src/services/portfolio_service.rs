use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::asset::{CryptoAsset, NewAsset};
use crate::models::command::{CommandOutcome, PortfolioCommand};
use crate::models::portfolio::Portfolio;

use super::ledger_service::LedgerService;
use super::valuation_service::ValuationService;

/// Applies portfolio commands: the reducer behind the tracker.
///
/// Pure business logic with no I/O. Every command validates
/// before it touches the portfolio, so a failed command leaves it unchanged.
pub struct PortfolioService {
    ledger: LedgerService,
    valuation: ValuationService,
}

impl PortfolioService {
    pub fn new() -> Self {
        Self {
            ledger: LedgerService::new(),
            valuation: ValuationService::new(),
        }
    }

    /// Apply a single command to the portfolio.
    pub fn apply(
        &self,
        portfolio: &mut Portfolio,
        command: PortfolioCommand,
    ) -> Result<CommandOutcome, CoreError> {
        match command {
            PortfolioCommand::AddAsset(details) => self
                .add_asset(portfolio, details)
                .map(CommandOutcome::AssetAdded),
            PortfolioCommand::RemoveAsset { id } => {
                Ok(CommandOutcome::AssetRemoved(self.remove_asset(portfolio, &id)))
            }
            PortfolioCommand::SetPrice { id, price } => self
                .set_price(portfolio, &id, price)
                .map(|_| CommandOutcome::PriceUpdated),
            PortfolioCommand::RecordPurchase {
                id,
                amount,
                cost,
                date,
            } => self
                .record_purchase(portfolio, &id, amount, cost, date)
                .map(CommandOutcome::PurchaseRecorded),
            PortfolioCommand::ReplaceAll(assets) => self
                .replace_all(portfolio, assets)
                .map(CommandOutcome::PortfolioReplaced),
        }
    }

    /// Append a new asset with zeroed metrics. Returns its id.
    pub fn add_asset(
        &self,
        portfolio: &mut Portfolio,
        details: NewAsset,
    ) -> Result<String, CoreError> {
        if details.name.trim().is_empty() {
            return Err(CoreError::Validation("name must not be empty".into()));
        }
        if details.symbol.trim().is_empty() {
            return Err(CoreError::Validation("symbol must not be empty".into()));
        }

        let asset = CryptoAsset::new(details);
        let id = asset.id.clone();
        portfolio.assets.push(asset);
        Ok(id)
    }

    /// Remove an asset by id. Returns `false` (and does nothing) if absent.
    pub fn remove_asset(&self, portfolio: &mut Portfolio, id: &str) -> bool {
        match portfolio.position(id) {
            Some(idx) => {
                portfolio.assets.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replace the current unit price and recompute the derived fields.
    /// A price whose derived value would overflow is rejected.
    pub fn set_price(
        &self,
        portfolio: &mut Portfolio,
        id: &str,
        price: f64,
    ) -> Result<(), CoreError> {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::InvalidPrice(format!(
                "price must be a non-negative number, got {price}"
            )));
        }

        let idx = portfolio
            .position(id)
            .ok_or_else(|| CoreError::AssetNotFound(id.to_string()))?;

        let mut updated = portfolio.assets[idx].clone();
        updated.current_price = price;
        self.valuation.recompute_in_place(&mut updated);
        if !updated.has_finite_metrics() {
            return Err(CoreError::InvalidPrice(format!(
                "price {price} overflows the value of {}",
                updated.symbol
            )));
        }

        portfolio.assets[idx] = updated;
        Ok(())
    }

    /// Record a purchase of `amount` units for a total of `cost`.
    /// The unit price is `cost / amount`. Returns the new transaction id.
    pub fn record_purchase(
        &self,
        portfolio: &mut Portfolio,
        id: &str,
        amount: f64,
        cost: f64,
        date: Option<DateTime<Utc>>,
    ) -> Result<String, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidTransaction(format!(
                "amount must be positive, got {amount}"
            )));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(CoreError::InvalidTransaction(format!(
                "cost must be non-negative, got {cost}"
            )));
        }

        let idx = portfolio.position(id).ok_or_else(|| {
            CoreError::InvalidTransaction(format!("no asset with id {id} in the portfolio"))
        })?;

        let price = cost / amount;
        let updated = self
            .ledger
            .append_transaction(&portfolio.assets[idx], price, amount, date)?;
        let transaction_id = updated
            .transactions
            .last()
            .map(|t| t.id.clone())
            .unwrap_or_default();

        portfolio.assets[idx] = updated;
        Ok(transaction_id)
    }

    /// Replace every asset at once (destructive, no merge).
    ///
    /// Rejects blank or duplicate ids, blank names and symbols, and values
    /// that overflow once recomputed. Derived fields of the incoming assets are
    /// recomputed so they always agree with price, holdings and investment.
    /// Returns the new asset count.
    pub fn replace_all(
        &self,
        portfolio: &mut Portfolio,
        assets: Vec<CryptoAsset>,
    ) -> Result<usize, CoreError> {
        let mut seen = HashSet::new();
        for (idx, asset) in assets.iter().enumerate() {
            let fields = [
                ("id", &asset.id),
                ("name", &asset.name),
                ("symbol", &asset.symbol),
            ];
            for (field, value) in fields {
                if value.trim().is_empty() {
                    return Err(CoreError::InvalidImportFormat(format!(
                        "asset[{idx}] is missing a non-empty '{field}'"
                    )));
                }
            }
            if !seen.insert(asset.id.as_str()) {
                return Err(CoreError::InvalidImportFormat(format!(
                    "duplicate asset id {}",
                    asset.id
                )));
            }
        }

        let recomputed: Vec<CryptoAsset> = assets
            .into_iter()
            .map(|a| self.valuation.recompute(a))
            .collect();
        if let Some(bad) = recomputed.iter().find(|a| !a.has_finite_metrics()) {
            return Err(CoreError::InvalidImportFormat(format!(
                "asset {} has values out of range",
                bad.id
            )));
        }

        portfolio.assets = recomputed;
        Ok(portfolio.assets.len())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
