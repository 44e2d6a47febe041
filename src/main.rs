#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use anyhow::Context;
use eframe::NativeOptions;
use std::sync::Arc;
use tokio::runtime::Runtime;

use stock_forecast::config::PROVIDER;
use stock_forecast::ui::config::UI_TEXT;
use stock_forecast::{AdditiveForecaster, ForecastPipeline, MemoizedProvider, YahooProvider, run_app};

/// Builds the runtime and the provider -> forecaster pipeline.
fn build_pipeline() -> anyhow::Result<(Arc<ForecastPipeline>, Arc<Runtime>)> {
    let runtime = Runtime::new().context("Failed to create Tokio runtime")?;
    let yahoo = YahooProvider::new().context("Yahoo provider unavailable")?;
    let provider = Arc::new(MemoizedProvider::new(yahoo));
    let forecaster = Arc::new(AdditiveForecaster::new());
    let pipeline = ForecastPipeline::new(provider, forecaster);
    Ok((Arc::new(pipeline), Arc::new(runtime)))
}

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "🚀 {} starting (history from {})",
        UI_TEXT.window_title,
        PROVIDER.history.start_date
    );

    // B. Pipeline
    let (pipeline, runtime) = match build_pipeline() {
        Ok(parts) => parts,
        Err(e) => {
            log::error!("❌ Startup failed: {:#}", e);
            return Ok(());
        }
    };

    // C. Run Native App
    eframe::run_native(
        UI_TEXT.window_title,
        NativeOptions::default(),
        Box::new(move |cc| Ok(run_app(cc, pipeline, runtime))),
    )
}
