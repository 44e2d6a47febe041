//! Forecast model and horizon configuration

/// Configuration for the "Years of Prediction" slider
#[derive(Debug)]
pub struct HorizonConfig {
    pub min_years: u32,
    pub max_years: u32,
    pub default_years: u32,
    /// Fixed approximation, not calendar aware
    pub days_per_year: u32,
}

/// Settings for one Fourier seasonality block
#[derive(Debug)]
pub struct SeasonalitySettings {
    pub period_days: f64,
    pub fourier_order: usize,
    /// History must span at least this many days before the block is fitted
    pub min_history_days: i64,
}

/// Settings for the piecewise-linear trend
#[derive(Debug)]
pub struct TrendSettings {
    pub n_changepoints: usize,
    /// Changepoints are placed within this leading fraction of history
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
}

/// The Master Forecast Configuration
#[derive(Debug)]
pub struct ForecastConfig {
    /// Fewer points than this cannot be fitted at all
    pub min_points: usize,
    /// Fewer points than this are fitted but logged as unreliable
    pub warn_points: usize,
    /// Coverage of the uncertainty interval (0.8 = 10th..90th percentile)
    pub interval_width: f64,
    pub seasonality_prior_scale: f64,
    /// Assumed observation noise (scaled units) used to turn priors into ridge penalties
    pub noise_scale: f64,
    /// Tiny ridge on base slope/offset so the normal equations stay positive definite
    pub base_penalty: f64,
    pub trend: TrendSettings,
    pub weekly: SeasonalitySettings,
    pub yearly: SeasonalitySettings,
}

pub const HORIZON: HorizonConfig = HorizonConfig {
    min_years: 1,
    max_years: 4,
    default_years: 1,
    days_per_year: 365,
};

pub const FORECAST: ForecastConfig = ForecastConfig {
    min_points: 2,
    warn_points: 30,
    interval_width: 0.8,
    seasonality_prior_scale: 10.0,
    noise_scale: 0.05,
    base_penalty: 1e-6,
    trend: TrendSettings {
        n_changepoints: 25,
        changepoint_range: 0.8,
        changepoint_prior_scale: 0.05,
    },
    weekly: SeasonalitySettings {
        period_days: 7.0,
        fourier_order: 3,
        min_history_days: 14,
    },
    yearly: SeasonalitySettings {
        period_days: 365.25,
        fourier_order: 10,
        min_history_days: 730,
    },
};
