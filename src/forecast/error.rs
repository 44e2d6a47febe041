use std::fmt;

/// Failures of model fitting.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Too few observations to fit a trend.
    InsufficientData { required: usize, actual: usize },
    /// Normal equations could not be solved (singular or non-finite input).
    Degenerate(String),
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { required, actual } => write!(
                f,
                "Insufficient data to fit a forecast: {} points required, {} available",
                required, actual
            ),
            Self::Degenerate(reason) => write!(f, "Forecast model could not be fitted: {}", reason),
        }
    }
}

impl std::error::Error for ForecastError {}
