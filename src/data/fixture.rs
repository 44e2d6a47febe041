//! In-memory provider used by tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::data::{DataError, PriceProvider};
use crate::models::{MarketSnapshot, PriceSeries};

/// Serves canned series; anything else is `DataUnavailable`.
pub(crate) struct FixtureProvider {
    series: HashMap<String, PriceSeries>,
    snapshot: MarketSnapshot,
    fetch_calls: AtomicUsize,
    snapshot_calls: AtomicUsize,
}

impl FixtureProvider {
    pub(crate) fn new() -> Self {
        Self {
            series: HashMap::new(),
            snapshot: MarketSnapshot {
                market_cap: 2_500_000_000_000,
                week52_high: 199.62,
                week52_low: 124.17,
            },
            fetch_calls: AtomicUsize::new(0),
            snapshot_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.ticker().to_string(), series);
        self
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceProvider for FixtureProvider {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, DataError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let series = self
            .series
            .get(ticker)
            .ok_or_else(|| DataError::unavailable(ticker, "HTTP 404 Not Found"))?;
        PriceSeries::from_unordered(ticker, series.bars().to_vec(), start, end).map(Arc::new)
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, DataError> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if self.series.contains_key(ticker) {
            Ok(self.snapshot)
        } else {
            Err(DataError::unavailable(ticker, "HTTP 404 Not Found"))
        }
    }

    fn signature(&self) -> &'static str {
        "Fixture"
    }
}
