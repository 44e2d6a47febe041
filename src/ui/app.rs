use eframe::{Frame, egui};
use poll_promise::Promise;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;

use crate::domain::UserSelection;
use crate::engine::{DashboardReport, ForecastPipeline, PipelineError};
use crate::ui::app_async::PipelineJobResult;
use crate::ui::charts::ChartView;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// When the displayed result was produced.
#[derive(Debug, Clone)]
pub(super) struct LastRun {
    pub(super) finished: Instant,
    pub(super) clock: String,
}

pub struct StockForecastApp {
    // UI state
    pub(super) selection: UserSelection,

    // Pipeline
    pub(super) pipeline: Arc<ForecastPipeline>,
    pub(super) runtime: Arc<Runtime>,
    pub(super) pipeline_promise: Option<Promise<PipelineJobResult>>,
    /// Latest selection made while a run was in flight; runs next
    pub(super) pending_selection: Option<UserSelection>,

    // Result state: at most one of these is shown
    pub(super) report: Option<Arc<DashboardReport>>,
    pub(super) last_error: Option<PipelineError>,
    pub(super) last_run: Option<LastRun>,

    pub(super) chart_view: ChartView,
}

impl StockForecastApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        pipeline: Arc<ForecastPipeline>,
        runtime: Arc<Runtime>,
    ) -> Self {
        let mut app = Self::with_pipeline(pipeline, runtime);

        // The dashboard is populated on first launch without any interaction
        app.start_pipeline_run(app.selection.clone());
        app
    }

    pub(super) fn with_pipeline(pipeline: Arc<ForecastPipeline>, runtime: Arc<Runtime>) -> Self {
        Self {
            selection: UserSelection::default(),
            pipeline,
            runtime,
            pipeline_promise: None,
            pending_selection: None,
            report: None,
            last_error: None,
            last_run: None,
            chart_view: ChartView::new(),
        }
    }

    /// Selection changed from the side panel: re-run everything for it.
    pub(super) fn on_selection_changed(&mut self) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Selection now {} / {} years",
                self.selection.ticker,
                self.selection.horizon.years()
            );
        }
        self.start_pipeline_run(self.selection.clone());
    }
}

impl eframe::App for StockForecastApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Cancel and clean up any ongoing pipeline run
        if let Some(promise) = self.pipeline_promise.take() {
            drop(promise);
        }
        self.pending_selection = None;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_pipeline_run(ctx);

        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
        self.render_status_panel(ctx);
    }
}
