//! Additive forecaster: piecewise-linear trend plus Fourier seasonality.

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::{FORECAST, ForecastConfig};
use crate::forecast::features::{FeatureSet, FourierBlock, TimeScale, changepoints};
use crate::forecast::solver::solve_ridge;
use crate::forecast::ForecastError;
use crate::models::{Forecast, ForecastRow, SeasonalProfiles, TrainingPair};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Any model fitter the pipeline can drive.
pub trait Forecaster: Send + Sync {
    /// Fits on chronological `(date, value)` pairs.
    fn fit(&self, history: &[TrainingPair]) -> Result<AdditiveModel, ForecastError>;

    /// A unique identifier for this implementation, used in logs.
    fn signature(&self) -> &'static str;
}

/// Production forecaster driven by a `ForecastConfig`.
#[derive(Debug, Clone, Copy)]
pub struct AdditiveForecaster {
    config: &'static ForecastConfig,
}

impl AdditiveForecaster {
    pub fn new() -> Self {
        Self { config: &FORECAST }
    }

    pub fn with_config(config: &'static ForecastConfig) -> Self {
        Self { config }
    }
}

impl Default for AdditiveForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for AdditiveForecaster {
    fn fit(&self, history: &[TrainingPair]) -> Result<AdditiveModel, ForecastError> {
        AdditiveModel::fit(history, self.config)
    }

    fn signature(&self) -> &'static str {
        "Additive (trend + Fourier)"
    }
}

/// A fitted model. Independent of any horizon; `predict` is pure.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveModel {
    features: FeatureSet,
    coefficients: Vec<f64>,
    /// Values were divided by this before fitting
    y_scale: f64,
    /// Residual standard deviation (scaled units)
    sigma: f64,
    /// Mean absolute changepoint rate adjustment (scaled units)
    delta_scale: f64,
    /// Two-sided quantile of the interval
    z: f64,
    history_dates: Vec<NaiveDate>,
}

impl AdditiveModel {
    pub fn fit(history: &[TrainingPair], config: &ForecastConfig) -> Result<Self, ForecastError> {
        if history.len() < config.min_points {
            return Err(ForecastError::InsufficientData {
                required: config.min_points,
                actual: history.len(),
            });
        }
        if history.len() < config.warn_points {
            log::warn!(
                "Fitting forecast on only {} points; results will be unreliable",
                history.len()
            );
        }

        let first = history[0].date;
        let last = history[history.len() - 1].date;
        let history_days = (last - first).num_days();
        let scale = TimeScale::from_history(first, last);
        let t: Vec<f64> = history.iter().map(|p| scale.scale(p.date)).collect();

        let features = FeatureSet {
            scale,
            changepoints: changepoints(&t, &config.trend),
            weekly: FourierBlock::when_enabled(&config.weekly, history_days),
            yearly: FourierBlock::when_enabled(&config.yearly, history_days),
        };

        let y_scale = history
            .iter()
            .map(|p| p.value.abs())
            .fold(0.0_f64, f64::max);
        let y_scale = if y_scale > 0.0 { y_scale } else { 1.0 };
        let y: Vec<f64> = history.iter().map(|p| p.value / y_scale).collect();

        let rows: Vec<Vec<f64>> = history.iter().map(|p| features.row(p.date)).collect();
        let penalties = Self::penalties(&features, config);
        let coefficients = solve_ridge(&rows, &y, &penalties)?;

        let sse: f64 = rows
            .iter()
            .zip(&y)
            .map(|(row, target)| (target - dot(row, &coefficients)).powi(2))
            .sum();
        let sigma = (sse / y.len() as f64).sqrt();

        let hinges = features.hinge_columns();
        let delta_scale = if hinges.is_empty() {
            0.0
        } else {
            coefficients[hinges.clone()].iter().map(|d| d.abs()).sum::<f64>() / hinges.len() as f64
        };

        let z = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::Degenerate(e.to_string()))?
            .inverse_cdf(0.5 + config.interval_width / 2.0);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_model_fit {
            log::info!(
                "Fitted {} points: {} changepoints, weekly={}, yearly={}, sigma={:.5}",
                history.len(),
                features.changepoints.len(),
                features.weekly.is_some(),
                features.yearly.is_some(),
                sigma * y_scale
            );
        }

        Ok(Self {
            features,
            coefficients,
            y_scale,
            sigma,
            delta_scale,
            z,
            history_dates: history.iter().map(|p| p.date).collect(),
        })
    }

    /// Ridge penalty per column: priors turned into `noise^2 / prior^2`.
    fn penalties(features: &FeatureSet, config: &ForecastConfig) -> Vec<f64> {
        let noise = config.noise_scale.powi(2);
        let delta = noise / config.trend.changepoint_prior_scale.powi(2);
        let seasonal = noise / config.seasonality_prior_scale.powi(2);

        let mut penalties = vec![config.base_penalty; 2];
        penalties.extend(features.hinge_columns().map(|_| delta));
        penalties.extend(features.weekly_columns().map(|_| seasonal));
        penalties.extend(features.yearly_columns().map(|_| seasonal));
        penalties
    }

    pub fn last_history_date(&self) -> NaiveDate {
        self.history_dates[self.history_dates.len() - 1]
    }

    pub fn changepoint_count(&self) -> usize {
        self.features.changepoints.len()
    }

    /// Rows for every history date plus `horizon_days` consecutive calendar
    /// days after the last history date.
    pub fn predict(&self, horizon_days: u32) -> Forecast {
        let last = self.last_history_date();
        let dates: Vec<NaiveDate> = self
            .history_dates
            .iter()
            .copied()
            .chain((1..=i64::from(horizon_days)).map(|d| last + Duration::days(d)))
            .collect();

        let rows: Vec<ForecastRow> = dates.par_iter().map(|&date| self.row_for(date)).collect();

        Forecast {
            rows,
            history_len: self.history_dates.len(),
            horizon_days,
            profiles: self.seasonal_profiles(),
        }
    }

    fn row_for(&self, date: NaiveDate) -> ForecastRow {
        let x = self.features.row(date);
        let trend = self.partial(&x, self.features.trend_columns());
        let weekly = self.partial(&x, self.features.weekly_columns());
        let yearly = self.partial(&x, self.features.yearly_columns());
        let seasonal_total = weekly + yearly;
        let estimate = trend + seasonal_total;

        let trend_sd = self.trend_sd(date);
        let total_sd = (self.sigma.powi(2) + trend_sd.powi(2)).sqrt() * self.y_scale;
        let trend_sd = trend_sd * self.y_scale;

        ForecastRow {
            date,
            estimate,
            lower: estimate - self.z * total_sd,
            upper: estimate + self.z * total_sd,
            trend,
            trend_lower: trend - self.z * trend_sd,
            trend_upper: trend + self.z * trend_sd,
            weekly,
            yearly,
            seasonal_total,
        }
    }

    /// Contribution of one column block, in original units.
    fn partial(&self, x: &[f64], columns: std::ops::Range<usize>) -> f64 {
        dot(&x[columns.clone()], &self.coefficients[columns]) * self.y_scale
    }

    /// Standard deviation (scaled units) of the trend at `date`.
    ///
    /// Future rate changes arrive as a Poisson process with the historical
    /// changepoint density `S` and Laplace magnitudes of scale `b`. The
    /// resulting offset variance after horizon `h` is `2 S b^2 h^3 / 3`.
    /// Zero inside history.
    fn trend_sd(&self, date: NaiveDate) -> f64 {
        let h = self.features.scale.scale(date) - 1.0;
        if h <= 0.0 || self.delta_scale == 0.0 {
            return 0.0;
        }
        let density = self.features.changepoints.len() as f64;
        self.delta_scale * (2.0 * density * h.powi(3) / 3.0).sqrt()
    }

    /// Weekly shape (Sunday first) and yearly shape (from 1 January).
    fn seasonal_profiles(&self) -> SeasonalProfiles {
        // 1970-01-04 was a Sunday; 2017 is not a leap year
        let sunday = NaiveDate::from_ymd_opt(1970, 1, 4).unwrap_or_default();
        let new_year = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or_default();

        let weekly = (0..7)
            .map(|d| {
                let x = self.features.row(sunday + Duration::days(d));
                self.partial(&x, self.features.weekly_columns())
            })
            .collect();
        let yearly = (0..365)
            .map(|d| {
                let x = self.features.row(new_year + Duration::days(d));
                self.partial(&x, self.features.yearly_columns())
            })
            .collect();

        SeasonalProfiles {
            weekly,
            yearly,
            weekly_enabled: self.features.weekly.is_some(),
            yearly_enabled: self.features.yearly.is_some(),
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
