use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::null_as_zero;

/// A single purchase of an asset.
///
/// `total` is fixed when the transaction is created and never recomputed,
/// even if `price` or `amount` are later found to be inexact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Time-ordered unique identifier (UUID v7)
    pub id: String,

    /// Unit price paid, in USD
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price: f64,

    /// Quantity purchased (always positive)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub amount: f64,

    /// When the purchase happened
    pub date: DateTime<Utc>,

    /// `price × amount` at creation time
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total: f64,
}

impl Transaction {
    pub fn new(price: f64, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            price,
            amount,
            date,
            total: price * amount,
        }
    }
}
