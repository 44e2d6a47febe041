// Additive time-series forecasting
pub mod error;
pub mod features;
pub mod model;
pub mod solver;

pub use error::ForecastError;
pub use model::{AdditiveForecaster, AdditiveModel, Forecaster};
