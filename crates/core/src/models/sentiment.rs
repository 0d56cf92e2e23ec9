use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reading of the crypto Fear & Greed index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedReading {
    /// 0 (extreme fear) to 100 (extreme greed)
    pub value: u8,

    /// Label published with the value, e.g. "Extreme Fear", "Greed"
    pub classification: String,

    pub timestamp: DateTime<Utc>,
}
