use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    // A constructor for convenience
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
