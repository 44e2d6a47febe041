#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use tokio::runtime::Runtime;

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod models;
pub mod ui;
pub mod utils;

// The pipeline that drives every panel
pub mod engine;

// Re-export commonly used types
pub use data::{MemoizedProvider, PriceProvider, YahooProvider};
pub use domain::{HorizonYears, PriceBar, UserSelection};
pub use engine::{DashboardReport, ForecastPipeline, PipelineError, PipelineRequest};
pub use forecast::{AdditiveForecaster, Forecaster};
pub use models::{Forecast, MarketSnapshot, PriceSeries};
pub use ui::StockForecastApp;

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    pipeline: Arc<ForecastPipeline>,
    runtime: Arc<Runtime>,
) -> Box<dyn eframe::App> {
    let app = ui::StockForecastApp::new(cc, pipeline, runtime);
    Box::new(app)
}
