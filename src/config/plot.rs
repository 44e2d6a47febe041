//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub open_color: Color32,
    pub close_color: Color32,
    /// Historical observations drawn under the forecast
    pub actual_points_color: Color32,
    pub estimate_color: Color32,
    /// Uncertainty band fill (kept translucent so the estimate stays readable)
    pub band_fill_color: Color32,
    pub trend_color: Color32,
    pub seasonal_color: Color32,
    /// Dashed marker separating history from projection
    pub horizon_marker_color: Color32,
    pub line_width: f32,
    pub actual_point_radius: f32,
    /// Height of every chart (pixels)
    pub chart_height: f32,
    /// Component charts are smaller
    pub component_chart_height: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    open_color: Color32::from_rgb(31, 119, 180), // Blue
    close_color: Color32::from_rgb(255, 127, 14), // Orange
    actual_points_color: Color32::from_rgb(220, 220, 220),
    estimate_color: Color32::from_rgb(0, 114, 178),
    band_fill_color: Color32::from_rgba_premultiplied(0, 60, 95, 90),
    trend_color: Color32::from_rgb(0, 114, 178),
    seasonal_color: Color32::from_rgb(0, 158, 115),
    horizon_marker_color: Color32::from_rgb(200, 80, 80),
    line_width: 1.5,
    actual_point_radius: 1.2,
    chart_height: 320.0,
    component_chart_height: 200.0,
};
