use crate::models::asset::{AssetStatus, CryptoAsset};

/// Derives value, profit, profit rate and status of an asset.
///
/// Pure business logic: the derived block depends only on
/// `current_price`, `holding_amount` and `investment_amount`.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Return `asset` with its derived fields recomputed.
    pub fn recompute(&self, mut asset: CryptoAsset) -> CryptoAsset {
        self.recompute_in_place(&mut asset);
        asset
    }

    /// Recompute the derived fields of `asset` in place.
    pub fn recompute_in_place(&self, asset: &mut CryptoAsset) {
        let current_value = asset.current_price * asset.holding_amount;
        let profit = current_value - asset.investment_amount;
        let profit_rate = if asset.investment_amount > 0.0 {
            profit / asset.investment_amount * 100.0
        } else {
            0.0
        };

        asset.current_value = current_value;
        asset.profit = profit;
        asset.profit_rate = profit_rate;
        asset.status = Self::status_for(profit_rate);
    }

    /// Map a profit rate (in percent) to a status. NaN is neutral.
    pub fn status_for(profit_rate: f64) -> AssetStatus {
        if profit_rate > 0.0 {
            AssetStatus::Profit
        } else if profit_rate < 0.0 {
            AssetStatus::Loss
        } else {
            AssetStatus::Neutral
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
