use eframe::egui::{Color32, Stroke};
use egui_plot::{Line, LineStyle, PlotPoints, PlotUi, Points, Polygon, VLine};

use crate::config::plot::PLOT_CONFIG;
use crate::models::{Forecast, PriceSeries};
use crate::ui::config::UI_TEXT;
use crate::utils::time_utils::date_to_x;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub series: &'a PriceSeries,
    pub forecast: &'a Forecast,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. UNCERTAINTY BAND LAYER
// ============================================================================
pub struct UncertaintyBandLayer;

impl PlotLayer for UncertaintyBandLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let bounds: Vec<(f64, f64, f64)> = ctx
            .forecast
            .rows
            .iter()
            .map(|row| (date_to_x(row.date), row.lower, row.upper))
            .collect();
        draw_band(plot_ui, UI_TEXT.series_band, &bounds, PLOT_CONFIG.band_fill_color);
    }
}

// ============================================================================
// 2. ACTUAL POINTS LAYER (History)
// ============================================================================
pub struct ActualPointsLayer;

impl PlotLayer for ActualPointsLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: Vec<[f64; 2]> = ctx
            .series
            .bars()
            .iter()
            .map(|bar| [date_to_x(bar.date), bar.close])
            .collect();

        plot_ui.points(
            Points::new(UI_TEXT.series_actual, PlotPoints::new(points))
                .color(PLOT_CONFIG.actual_points_color)
                .radius(PLOT_CONFIG.actual_point_radius),
        );
    }
}

// ============================================================================
// 3. ESTIMATE LAYER
// ============================================================================
pub struct EstimateLayer;

impl PlotLayer for EstimateLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let points: Vec<[f64; 2]> = ctx
            .forecast
            .rows
            .iter()
            .map(|row| [date_to_x(row.date), row.estimate])
            .collect();

        plot_ui.line(
            Line::new(UI_TEXT.series_estimate, PlotPoints::new(points))
                .color(PLOT_CONFIG.estimate_color)
                .width(PLOT_CONFIG.line_width),
        );
    }
}

// ============================================================================
// 4. HORIZON MARKER LAYER
// ============================================================================
pub struct HorizonMarkerLayer;

impl PlotLayer for HorizonMarkerLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if ctx.forecast.future().is_empty() {
            return;
        }
        if let Some(last) = ctx.forecast.last_history_date() {
            plot_ui.vline(
                VLine::new(UI_TEXT.series_horizon, date_to_x(last))
                    .color(PLOT_CONFIG.horizon_marker_color)
                    .style(LineStyle::dashed_loose()),
            );
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Fills the area between `lower` and `upper` as one convex quad per segment,
/// grouped under a single legend entry.
pub fn draw_band(plot_ui: &mut PlotUi, label: &str, bounds: &[(f64, f64, f64)], fill: Color32) {
    for pair in bounds.windows(2) {
        let (x0, lo0, hi0) = pair[0];
        let (x1, lo1, hi1) = pair[1];
        let quad = PlotPoints::new(vec![[x0, lo0], [x1, lo1], [x1, hi1], [x0, hi0]]);
        plot_ui.polygon(Polygon::new(label, quad).fill_color(fill).stroke(Stroke::NONE));
    }
}
