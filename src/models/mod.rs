// Data model for the forecast dashboard
// Pure values, independent of UI/visualization and of any provider

pub mod forecast;
pub mod price_series;
pub mod snapshot;

// Re-export key types for convenience
pub use forecast::{Forecast, ForecastComponent, ForecastRow, SeasonalProfiles};
pub use price_series::{DailyChange, PriceSeries, TrainingPair};
pub use snapshot::MarketSnapshot;
