use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which assets take part in a [`PortfolioSummary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFilter {
    /// Leave out manually entered assets
    pub exclude_custom: bool,
}

impl SummaryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn listed_only() -> Self {
        Self {
            exclude_custom: true,
        }
    }
}

/// Aggregate profit/loss over the included assets. All amounts in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of assets included in the totals
    pub asset_count: usize,

    /// Sum of every asset's investment amount
    pub total_investment: f64,

    /// Sum of current price × holding amount
    pub total_current_value: f64,

    /// total_current_value - total_investment
    pub total_profit_loss: f64,

    /// total_profit_loss / total_investment × 100, or 0 with nothing invested
    pub overall_return: f64,

    /// Date of the earliest purchase across included assets
    pub earliest_transaction_date: Option<DateTime<Utc>>,
}

/// A single asset whose price could not be refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshFailure {
    pub asset_id: String,
    pub symbol: String,
    pub reason: String,
}

/// Outcome of a batch price refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Assets with an address that were queried
    pub attempted: usize,

    /// Assets whose new price was applied
    pub succeeded: usize,

    pub failures: Vec<RefreshFailure>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.attempted
    }
}

impl std::fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} succeeded", self.succeeded, self.attempted)
    }
}
