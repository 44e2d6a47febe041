use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// One row of model output, for a historical or a projected date.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    /// Point estimate (trend + seasonal terms)
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    pub weekly: f64,
    pub yearly: f64,
    /// Sum of all seasonal terms
    pub seasonal_total: f64,
}

impl ForecastRow {
    pub fn band_width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Additive components shown in the breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ForecastComponent {
    #[strum(to_string = "trend")]
    Trend,
    #[strum(to_string = "weekly")]
    Weekly,
    #[strum(to_string = "yearly")]
    Yearly,
}

/// Seasonal shapes over one period, independent of any particular date range.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonalProfiles {
    /// Sunday first, seven entries
    pub weekly: Vec<f64>,
    /// Day of year from 1 January, 365 entries
    pub yearly: Vec<f64>,
    pub weekly_enabled: bool,
    pub yearly_enabled: bool,
}

/// Full model output: one row per historical date followed by
/// `horizon_days` consecutive calendar days after the last historical date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Forecast {
    pub rows: Vec<ForecastRow>,
    pub history_len: usize,
    pub horizon_days: u32,
    pub profiles: SeasonalProfiles,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn history(&self) -> &[ForecastRow] {
        &self.rows[..self.history_len]
    }

    pub fn future(&self) -> &[ForecastRow] {
        &self.rows[self.history_len..]
    }

    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn last_history_date(&self) -> Option<NaiveDate> {
        self.history().last().map(|row| row.date)
    }

    pub fn last(&self) -> Option<&ForecastRow> {
        self.rows.last()
    }
}
