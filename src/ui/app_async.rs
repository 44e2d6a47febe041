use eframe::egui;
use poll_promise::Promise;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::UserSelection;
use crate::engine::{DashboardReport, ForecastPipeline, PipelineError, PipelineRequest};
use crate::ui::app::{LastRun, StockForecastApp};
use crate::utils::time_utils::{local_clock_now, today_local};

pub(crate) struct PipelineJobResult {
    pub(super) result: Result<Arc<DashboardReport>, PipelineError>,
    pub(super) selection: UserSelection,
    elapsed_time: Duration,
}

impl PipelineJobResult {
    pub(super) fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }
}

impl StockForecastApp {
    /// Starts a run for `selection`, or queues it behind the run in flight.
    pub(super) fn start_pipeline_run(&mut self, selection: UserSelection) {
        if self.pipeline_promise.is_some() {
            // Only the latest queued selection matters
            self.pending_selection = Some(selection);
            return;
        }

        let pipeline = Arc::clone(&self.pipeline);
        let runtime = Arc::clone(&self.runtime);
        let request = PipelineRequest::up_to(selection, today_local());

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_pipeline_timings {
            log::info!(
                "Starting pipeline for {} ({} .. {})",
                request.selection.ticker,
                request.start,
                request.end
            );
        }

        let promise = Promise::spawn_thread("forecast_pipeline", move || {
            run_pipeline(pipeline, runtime, request)
        });
        self.pipeline_promise = Some(promise);
    }

    pub(super) fn poll_pipeline_run(&mut self, ctx: &egui::Context) {
        if self.take_finished_run() || self.pipeline_promise.is_some() {
            ctx.request_repaint();
        }
    }

    /// Applies a finished run, then starts any queued selection.
    /// Returns true when a run finished this call.
    pub(super) fn take_finished_run(&mut self) -> bool {
        let outcome = self.pipeline_promise.as_ref().and_then(|promise| {
            promise.ready().map(|job| {
                let result = job.result.as_ref().map(Arc::clone).map_err(|e| e.clone());
                (result, job.selection.clone(), job.elapsed_time())
            })
        });

        let Some((result, selection, elapsed)) = outcome else {
            return false;
        };
        self.pipeline_promise = None;

        // A result for a superseded selection is never shown
        if selection == self.selection {
            match result {
                Ok(report) => {
                    log::info!(
                        "✅ Pipeline for {} completed in {:.2}s",
                        selection.ticker,
                        elapsed.as_secs_f32()
                    );
                    self.report = Some(report);
                    self.last_error = None;
                }
                Err(error) => {
                    log::error!("❌ Pipeline for {} failed: {}", selection.ticker, error);
                    self.report = None;
                    self.last_error = Some(error);
                }
            }
            self.last_run = Some(LastRun {
                finished: Instant::now(),
                clock: local_clock_now(),
            });
        } else {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_pipeline_timings {
                log::info!(
                    "Discarding stale result for {} after {:.2}s",
                    selection.ticker,
                    elapsed.as_secs_f32()
                );
            }
        }

        if let Some(next) = self.pending_selection.take() {
            self.start_pipeline_run(next);
        }
        true
    }

    pub(super) fn is_running(&self) -> bool {
        self.pipeline_promise.is_some()
    }
}

fn run_pipeline(
    pipeline: Arc<ForecastPipeline>,
    runtime: Arc<Runtime>,
    request: PipelineRequest,
) -> PipelineJobResult {
    let started = Instant::now();
    let result = runtime.block_on(pipeline.run(&request)).map(Arc::new);

    PipelineJobResult {
        result,
        selection: request.selection,
        elapsed_time: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture::FixtureProvider;
    use crate::forecast::AdditiveForecaster;
    use crate::models::price_series::tests::{day, series_from_closes};

    fn app() -> StockForecastApp {
        let closes: Vec<f64> = (0..90).map(|i| 100.0 + i as f64 * 0.5).collect();
        let provider = FixtureProvider::new()
            .with_series(series_from_closes("AAPL", day(2024, 1, 1), &closes))
            .with_series(series_from_closes("MSFT", day(2024, 1, 1), &closes));
        let pipeline = ForecastPipeline::new(Arc::new(provider), Arc::new(AdditiveForecaster::new()));
        let runtime = Runtime::new().unwrap();
        StockForecastApp::with_pipeline(Arc::new(pipeline), Arc::new(runtime))
    }

    fn wait_for_run(app: &mut StockForecastApp) {
        if let Some(promise) = app.pipeline_promise.as_ref() {
            promise.block_until_ready();
        }
        assert!(app.take_finished_run());
    }

    #[test]
    fn finished_run_populates_report() {
        let mut app = app();
        app.selection = UserSelection::new("AAPL", 1);
        app.start_pipeline_run(app.selection.clone());
        assert!(app.is_running());

        wait_for_run(&mut app);

        assert!(!app.is_running());
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.selection.ticker, "AAPL");
        assert_eq!(report.forecast.len(), 90 + 365);
        assert!(app.last_error.is_none());
        assert!(app.last_run.is_some());
    }

    #[test]
    fn failed_run_replaces_report_with_error() {
        let mut app = app();
        app.selection = UserSelection::new("AAPL", 1);
        app.start_pipeline_run(app.selection.clone());
        wait_for_run(&mut app);
        assert!(app.report.is_some());

        app.selection = UserSelection::new("NOPE", 1);
        app.start_pipeline_run(app.selection.clone());
        wait_for_run(&mut app);

        assert!(app.report.is_none());
        assert!(matches!(app.last_error, Some(PipelineError::Data(_))));
    }

    #[test]
    fn selection_made_while_busy_runs_next() {
        let mut app = app();
        app.selection = UserSelection::new("AAPL", 1);
        app.start_pipeline_run(app.selection.clone());

        app.selection = UserSelection::new("MSFT", 2);
        app.start_pipeline_run(app.selection.clone());
        assert_eq!(app.pending_selection, Some(UserSelection::new("MSFT", 2)));

        // First result is stale, the queued run starts
        wait_for_run(&mut app);
        assert!(app.report.is_none());
        assert!(app.is_running());
        assert!(app.pending_selection.is_none());

        wait_for_run(&mut app);
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.selection, UserSelection::new("MSFT", 2));
        assert_eq!(report.forecast.horizon_days, 730);
    }
}
