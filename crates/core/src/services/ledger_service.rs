use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::asset::CryptoAsset;
use crate::models::transaction::Transaction;

use super::valuation_service::ValuationService;

/// Appends purchases to an asset and maintains its weighted-average cost basis.
pub struct LedgerService {
    valuation: ValuationService,
}

impl LedgerService {
    pub fn new() -> Self {
        Self {
            valuation: ValuationService::new(),
        }
    }

    /// Record a purchase of `amount` units at unit `price`.
    ///
    /// Returns the updated asset; `asset` itself is left untouched, so a
    /// validation failure never leaves it half-updated. A purchase whose
    /// totals would overflow to infinity is rejected.
    /// `date` defaults to now.
    pub fn append_transaction(
        &self,
        asset: &CryptoAsset,
        price: f64,
        amount: f64,
        date: Option<DateTime<Utc>>,
    ) -> Result<CryptoAsset, CoreError> {
        Self::validate(price, amount)?;

        let transaction = Transaction::new(price, amount, date.unwrap_or_else(Utc::now));

        let mut updated = asset.clone();
        updated.investment_amount += transaction.total;
        updated.holding_amount += transaction.amount;
        updated.average_cost = if updated.holding_amount > 0.0 {
            updated.investment_amount / updated.holding_amount
        } else {
            0.0
        };
        updated.transactions.push(transaction);

        let updated = self.valuation.recompute(updated);
        let totals_finite = updated.transactions.iter().all(|t| t.total.is_finite());
        if !updated.has_finite_metrics() || !totals_finite {
            return Err(CoreError::InvalidTransaction(format!(
                "purchase of {amount} at {price} overflows the asset totals"
            )));
        }
        Ok(updated)
    }

    /// Rules:
    /// - Amount must be positive and finite
    /// - Price must be non-negative and finite
    fn validate(price: f64, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidTransaction(format!(
                "amount must be positive, got {amount}"
            )));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::InvalidTransaction(format!(
                "price must be non-negative, got {price}"
            )));
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
