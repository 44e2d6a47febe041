use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::DataError;
use crate::domain::PriceBar;

// ============================================================================
// PriceSeries: daily history for one ticker
// ============================================================================

/// Chronological daily bars for a single ticker.
///
/// Invariants: at least one bar, dates strictly increasing. Once built the
/// series is never mutated; derived columns are computed on demand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

/// `(date, value)` pair in the shape the forecaster expects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrainingPair {
    pub date: NaiveDate,
    pub value: f64,
}

/// Close-to-close change. `None` on the first day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DailyChange {
    pub date: NaiveDate,
    pub change: Option<f64>,
}

impl PriceSeries {
    /// Normalizes raw provider bars: keeps `[start, end]`, sorts by date and
    /// collapses duplicate dates to the last bar seen.
    pub fn from_unordered(
        ticker: &str,
        mut bars: Vec<PriceBar>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, DataError> {
        bars.retain(|bar| bar.date >= start && bar.date <= end);
        // Stable sort keeps provider order within a date so "last wins" below
        bars.sort_by_key(|bar| bar.date);
        let bars: Vec<PriceBar> = bars
            .into_iter()
            .coalesce(|prev, next| {
                if prev.date == next.date {
                    Ok(next)
                } else {
                    Err((prev, next))
                }
            })
            .collect();

        if bars.is_empty() {
            return Err(DataError::EmptySeries {
                ticker: ticker.to_string(),
                start,
                end,
            });
        }

        Ok(Self {
            ticker: ticker.to_string(),
            bars,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Last `n` bars (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }

    /// Projection to the forecaster schema: `date -> date`, `close -> value`.
    pub fn training_pairs(&self) -> Vec<TrainingPair> {
        self.bars
            .iter()
            .map(|bar| TrainingPair {
                date: bar.date,
                value: bar.close,
            })
            .collect()
    }

    /// `change[0]` is `None`; `change[t] = close[t] - close[t-1]`.
    pub fn daily_changes(&self) -> Vec<DailyChange> {
        let first = DailyChange {
            date: self.bars[0].date,
            change: None,
        };
        std::iter::once(first)
            .chain(self.bars.iter().tuple_windows().map(|(prev, cur)| DailyChange {
                date: cur.date,
                change: Some(cur.close - prev.close),
            }))
            .collect()
    }
}
