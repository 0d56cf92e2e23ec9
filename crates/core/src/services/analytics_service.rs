use std::cmp::Ordering;

use crate::models::analytics::{PortfolioSummary, SummaryFilter};
use crate::models::asset::{AssetSortOrder, CryptoAsset};
use crate::models::portfolio::Portfolio;

/// Aggregate queries over the portfolio. Read-only.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Compute totals, overall return and the first purchase date over
    /// every asset accepted by `filter`.
    pub fn summary(&self, portfolio: &Portfolio, filter: &SummaryFilter) -> PortfolioSummary {
        let mut asset_count = 0;
        let mut total_investment = 0.0;
        let mut total_current_value = 0.0;
        let mut earliest_transaction_date = None;

        for asset in portfolio.assets.iter().filter(|a| Self::included(a, filter)) {
            asset_count += 1;
            total_investment += asset.investment_amount;
            total_current_value += asset.current_price * asset.holding_amount;

            if let Some(first) = asset.transactions.iter().map(|t| t.date).min() {
                earliest_transaction_date = match earliest_transaction_date {
                    Some(current) if current <= first => Some(current),
                    _ => Some(first),
                };
            }
        }

        let total_profit_loss = total_current_value - total_investment;
        let overall_return = if total_investment > 0.0 {
            total_profit_loss / total_investment * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            asset_count,
            total_investment,
            total_current_value,
            total_profit_loss,
            overall_return,
            earliest_transaction_date,
        }
    }

    /// Assets ordered for display. Ties keep insertion order.
    pub fn sorted_assets<'a>(
        &self,
        portfolio: &'a Portfolio,
        order: AssetSortOrder,
    ) -> Vec<&'a CryptoAsset> {
        let mut assets: Vec<&CryptoAsset> = portfolio.assets.iter().collect();
        let desc = |a: f64, b: f64| b.partial_cmp(&a).unwrap_or(Ordering::Equal);
        match order {
            AssetSortOrder::Added => {}
            AssetSortOrder::SymbolAsc => {
                assets.sort_by(|a, b| a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase()))
            }
            AssetSortOrder::PriceDesc => {
                assets.sort_by(|a, b| desc(a.current_price, b.current_price))
            }
            AssetSortOrder::AverageCostDesc => {
                assets.sort_by(|a, b| desc(a.average_cost, b.average_cost))
            }
            AssetSortOrder::HoldingDesc => {
                assets.sort_by(|a, b| desc(a.holding_amount, b.holding_amount))
            }
            AssetSortOrder::InvestmentDesc => {
                assets.sort_by(|a, b| desc(a.investment_amount, b.investment_amount))
            }
            AssetSortOrder::ValueDesc => {
                assets.sort_by(|a, b| desc(a.current_value, b.current_value))
            }
            AssetSortOrder::ProfitDesc => assets.sort_by(|a, b| desc(a.profit, b.profit)),
            AssetSortOrder::ProfitRateDesc => {
                assets.sort_by(|a, b| desc(a.profit_rate, b.profit_rate))
            }
            AssetSortOrder::ProfitRateAsc => assets.sort_by(|a, b| {
                a.profit_rate
                    .partial_cmp(&b.profit_rate)
                    .unwrap_or(Ordering::Equal)
            }),
        }
        assets
    }

    fn included(asset: &CryptoAsset, filter: &SummaryFilter) -> bool {
        !(filter.exclude_custom && asset.is_custom)
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
