use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::company_name;
use crate::data::PriceProvider;
use crate::forecast::{AdditiveModel, Forecaster};
use crate::models::{PriceSeries, TrainingPair};
#[cfg(debug_assertions)]
use crate::utils::time_utils::how_long_ago;

use super::error::PipelineError;
use super::messages::{DashboardReport, PipelineRequest};
use super::state::TickerState;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Fetch -> fit -> predict -> derive, in that order, aborting on the first error.
pub struct ForecastPipeline {
    provider: Arc<dyn PriceProvider>,
    forecaster: Arc<dyn Forecaster>,

    /// Fitted models by ticker. A horizon change reuses the entry, a revised history replaces it.
    models: DashMap<String, TickerState>,
}

impl ForecastPipeline {
    pub fn new(provider: Arc<dyn PriceProvider>, forecaster: Arc<dyn Forecaster>) -> Self {
        #[cfg(debug_assertions)]
        log::info!(
            "Pipeline: provider = {}, forecaster = {}",
            provider.signature(),
            forecaster.signature()
        );

        Self {
            provider,
            forecaster,
            models: DashMap::new(),
        }
    }

    /// Runs one full interaction for the request's selection.
    pub async fn run(&self, request: &PipelineRequest) -> Result<DashboardReport, PipelineError> {
        let started = Instant::now();
        let ticker = request.selection.ticker.as_str();

        // 1. History (memoized by the provider)
        let series = self.provider.fetch(ticker, request.start, request.end).await?;
        // 2. Snapshot
        let snapshot = self.provider.fetch_snapshot(ticker).await?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_pipeline_timings {
            log::info!("{}: data ready in {:?}", ticker, started.elapsed());
        }

        // 3-4. Training pairs and fit
        let (model, model_reused) = self.model_for(&series)?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_pipeline_timings {
            log::info!(
                "{}: model {} in {:?}",
                ticker,
                if model_reused { "reused" } else { "fitted" },
                started.elapsed()
            );
        }

        // 5. Predict
        let forecast = model.predict(request.selection.horizon_days());
        // 6. Daily changes
        let daily_changes = series.daily_changes();

        let elapsed = started.elapsed();
        log::info!(
            "{} ({} bars, {} forecast rows) done in {:?}",
            ticker,
            series.len(),
            forecast.len(),
            elapsed
        );

        Ok(DashboardReport {
            selection: request.selection.clone(),
            company_name: company_name(ticker).unwrap_or(ticker).to_string(),
            series,
            snapshot,
            forecast,
            daily_changes,
            model_reused,
            elapsed,
        })
    }

    fn model_for(&self, series: &Arc<PriceSeries>) -> Result<(Arc<AdditiveModel>, bool), PipelineError> {
        let ticker = series.ticker();
        if let Some(state) = self.models.get(ticker) {
            if state.is_current_for(series) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_model_fit {
                    log::info!(
                        "{}: reusing model fitted {}",
                        ticker,
                        how_long_ago(state.fitted_at.elapsed().as_secs() as i64)
                    );
                }
                return Ok((Arc::clone(&state.model), true));
            }
        }

        let pairs: Vec<TrainingPair> = series.training_pairs();
        let model = Arc::new(self.forecaster.fit(&pairs)?);
        self.models
            .insert(ticker.to_string(), TickerState::new(Arc::clone(&model), Arc::clone(series)));
        Ok((model, false))
    }

    /// Number of tickers with a fitted model.
    pub fn fitted_count(&self) -> usize {
        self.models.len()
    }
}
