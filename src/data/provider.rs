use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::data::DataError;
use crate::models::{MarketSnapshot, PriceSeries};

/// A source of daily price history and snapshot fields for a ticker.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Daily bars for `ticker` within `[start, end]`, dates strictly increasing.
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, DataError>;

    /// Market capitalization and 52-week high/low.
    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, DataError>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

#[async_trait]
impl<P: PriceProvider + ?Sized> PriceProvider for Arc<P> {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, DataError> {
        (**self).fetch(ticker, start, end).await
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, DataError> {
        (**self).fetch_snapshot(ticker).await
    }

    fn signature(&self) -> &'static str {
        (**self).signature()
    }
}
