//! Regressors of the additive model: trend hinges and Fourier seasonality.

use chrono::NaiveDate;
use std::f64::consts::PI;
use std::ops::Range;

use crate::config::forecast::{SeasonalitySettings, TrendSettings};
use crate::utils::time_utils::date_to_x;

/// Maps calendar dates onto `[0, 1]` over the history span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    origin: NaiveDate,
    span_days: f64,
}

impl TimeScale {
    pub fn from_history(first: NaiveDate, last: NaiveDate) -> Self {
        let span = (last - first).num_days().max(1);
        Self {
            origin: first,
            span_days: span as f64,
        }
    }

    pub fn scale(&self, date: NaiveDate) -> f64 {
        (date - self.origin).num_days() as f64 / self.span_days
    }
}

/// Days since the Unix epoch, the phase reference of every Fourier term.
pub fn epoch_days(date: NaiveDate) -> f64 {
    date_to_x(date)
}

/// Changepoint locations (scaled time) at evenly spaced history points
/// within the leading `changepoint_range` fraction of history.
pub fn changepoints(t: &[f64], settings: &TrendSettings) -> Vec<f64> {
    let hist = (t.len() as f64 * settings.changepoint_range).floor() as usize;
    if hist < 2 {
        return Vec::new();
    }
    let n = settings.n_changepoints.min(hist - 1);
    if n == 0 {
        return Vec::new();
    }
    let step = (hist - 1) as f64 / n as f64;
    (1..=n)
        .map(|i| t[(i as f64 * step).round() as usize])
        .collect()
}

/// One enabled Fourier block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourierBlock {
    pub period_days: f64,
    pub order: usize,
}

impl FourierBlock {
    /// Enabled only when history is long enough to see the cycle.
    pub fn when_enabled(settings: &SeasonalitySettings, history_days: i64) -> Option<Self> {
        (history_days >= settings.min_history_days && settings.fourier_order > 0).then_some(Self {
            period_days: settings.period_days,
            order: settings.fourier_order,
        })
    }

    pub fn width(&self) -> usize {
        2 * self.order
    }

    fn push_terms(&self, day: f64, out: &mut Vec<f64>) {
        for k in 1..=self.order {
            let x = 2.0 * PI * k as f64 * day / self.period_days;
            out.push(x.sin());
            out.push(x.cos());
        }
    }
}

/// Column layout of the design matrix:
/// `[offset, slope, hinge_1..hinge_c, weekly.., yearly..]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub scale: TimeScale,
    pub changepoints: Vec<f64>,
    pub weekly: Option<FourierBlock>,
    pub yearly: Option<FourierBlock>,
}

impl FeatureSet {
    pub fn width(&self) -> usize {
        self.yearly_columns().end
    }

    pub fn trend_columns(&self) -> Range<usize> {
        0..2 + self.changepoints.len()
    }

    pub fn hinge_columns(&self) -> Range<usize> {
        2..self.trend_columns().end
    }

    pub fn weekly_columns(&self) -> Range<usize> {
        let start = self.trend_columns().end;
        start..start + self.weekly.map_or(0, |b| b.width())
    }

    pub fn yearly_columns(&self) -> Range<usize> {
        let start = self.weekly_columns().end;
        start..start + self.yearly.map_or(0, |b| b.width())
    }

    /// Full regressor row for one date.
    pub fn row(&self, date: NaiveDate) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        self.trend_row(self.scale.scale(date), &mut row);
        let day = epoch_days(date);
        if let Some(block) = self.weekly {
            block.push_terms(day, &mut row);
        }
        if let Some(block) = self.yearly {
            block.push_terms(day, &mut row);
        }
        row
    }

    fn trend_row(&self, t: f64, out: &mut Vec<f64>) {
        out.push(1.0);
        out.push(t);
        out.extend(self.changepoints.iter().map(|s| (t - s).max(0.0)));
    }
}
