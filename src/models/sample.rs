//! Price/volume observation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One timestamped price/volume observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub volume: u64,
}

impl Sample {
    /// Creates a new sample.
    pub fn new(timestamp: DateTime<Utc>, price: Decimal, volume: u64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }
}
