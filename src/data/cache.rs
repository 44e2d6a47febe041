//! Process-lifetime memoization of price history, backed by `DashMap`.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

use crate::data::{DataError, PriceProvider};
use crate::models::{MarketSnapshot, PriceSeries};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

type HistoryKey = (String, NaiveDate, NaiveDate);

/// Wraps a provider so identical `(ticker, start, end)` requests hit the
/// network once. Failures are never cached. Snapshots always pass through.
pub struct MemoizedProvider<P> {
    inner: P,
    store: DashMap<HistoryKey, Arc<PriceSeries>>,
}

impl<P: PriceProvider> MemoizedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            store: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of memoized series.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drops every memoized series.
    pub fn clear(&self) {
        self.store.clear();
    }
}

#[async_trait]
impl<P: PriceProvider> PriceProvider for MemoizedProvider<P> {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, DataError> {
        let key = (ticker.to_string(), start, end);
        if let Some(hit) = self.store.get(&key) {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_cache_events {
                log::info!("History cache hit: {} {}..{}", ticker, start, end);
            }
            return Ok(Arc::clone(hit.value()));
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_cache_events {
            log::info!("History cache miss: {} {}..{}", ticker, start, end);
        }

        let series = self.inner.fetch(ticker, start, end).await?;
        // A concurrent miss may have filled the slot first; keep whichever landed
        let stored = self.store.entry(key).or_insert(series).clone();
        Ok(stored)
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, DataError> {
        self.inner.fetch_snapshot(ticker).await
    }

    fn signature(&self) -> &'static str {
        self.inner.signature()
    }
}
