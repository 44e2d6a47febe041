//! Configuration module for the stock forecast application.

pub mod catalog;
pub mod forecast;
pub mod provider;

mod debug; // Private: use crate::config::DEBUG_FLAGS rather than crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use catalog::{TICKER_CATALOG, company_name};
pub use forecast::{FORECAST, ForecastConfig, HORIZON};
pub use provider::{PROVIDER, ProviderConfig};
