use serde::{Deserialize, Serialize};

/// Point-in-time scalar fields shown in the statistics panel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MarketSnapshot {
    pub market_cap: u64,
    pub week52_high: f64,
    pub week52_low: f64,
}
