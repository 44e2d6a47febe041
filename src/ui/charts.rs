//! Chart panels: raw open/close with a range control, forecast, components
//! and the historical close line.

use chrono::{Duration, NaiveDate};
use eframe::egui::{self, Slider, Ui};
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Line, Plot, PlotPoints};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::PriceBar;
use crate::models::{Forecast, ForecastComponent, PriceSeries};
use crate::ui::config::UI_TEXT;
use crate::ui::plot_layers::{
    ActualPointsLayer, EstimateLayer, HorizonMarkerLayer, LayerContext, PlotLayer,
    UncertaintyBandLayer, draw_band,
};
use crate::ui::styles::UiStyleExt;
use crate::utils::maths_utils::padded_bounds;
use crate::utils::time_utils::{date_to_x, format_date, months_before, start_of_year, x_to_date};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// ============================================================================
// Range control
// ============================================================================

/// Quick-select windows for the raw data chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum RangePreset {
    #[strum(to_string = "1M")]
    OneMonth,
    #[strum(to_string = "6M")]
    SixMonths,
    #[strum(to_string = "YTD")]
    YearToDate,
    #[strum(to_string = "1Y")]
    OneYear,
    #[strum(to_string = "All")]
    All,
}

impl RangePreset {
    /// Earliest date the preset keeps, relative to the last bar.
    fn cutoff(&self, last: NaiveDate) -> Option<NaiveDate> {
        match self {
            RangePreset::OneMonth => Some(months_before(last, 1)),
            RangePreset::SixMonths => Some(months_before(last, 6)),
            RangePreset::YearToDate => Some(start_of_year(last)),
            RangePreset::OneYear => Some(months_before(last, 12)),
            RangePreset::All => None,
        }
    }
}

/// Inclusive bar index window into a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: usize,
    pub end: usize,
}

impl RangeWindow {
    pub fn full(len: usize) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
        }
    }

    pub fn from_preset(preset: RangePreset, bars: &[PriceBar]) -> Self {
        let mut window = Self::full(bars.len());
        if let Some(cutoff) = bars.last().and_then(|bar| preset.cutoff(bar.date)) {
            window.start = bars.partition_point(|bar| bar.date < cutoff).min(window.end);
        }
        window
    }

    /// Keeps `start <= end < len`.
    pub fn clamped(self, len: usize) -> Self {
        let end = self.end.min(len.saturating_sub(1));
        Self {
            start: self.start.min(end),
            end,
        }
    }

    pub fn slice<'a>(&self, bars: &'a [PriceBar]) -> &'a [PriceBar] {
        if bars.is_empty() {
            return bars;
        }
        let window = self.clamped(bars.len());
        &bars[window.start..=window.end]
    }
}

// ============================================================================
// Series builders
// ============================================================================

/// `[x, y]` points with x in days since the epoch.
pub fn bar_points(bars: &[PriceBar], value: impl Fn(&PriceBar) -> f64) -> Vec<[f64; 2]> {
    bars.iter().map(|bar| [date_to_x(bar.date), value(bar)]).collect()
}

/// Points of one component across every forecast row.
pub fn component_points(forecast: &Forecast, component: ForecastComponent) -> Vec<[f64; 2]> {
    forecast
        .rows
        .iter()
        .map(|row| {
            let y = match component {
                ForecastComponent::Trend => row.trend,
                ForecastComponent::Weekly => row.weekly,
                ForecastComponent::Yearly => row.yearly,
            };
            [date_to_x(row.date), y]
        })
        .collect()
}

/// Seasonal profile as `[index, value]` points.
pub fn profile_points(profile: &[f64]) -> Vec<[f64; 2]> {
    profile
        .iter()
        .enumerate()
        .map(|(i, v)| [i as f64, *v])
        .collect()
}

fn date_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| x_to_date(grid_mark.value).map(format_date).unwrap_or_default())
}

fn price_axis(label: String) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(label)
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}

fn base_plot(id: &str, height: f32) -> Plot<'static> {
    Plot::new(id.to_string())
        .height(height)
        .legend(Legend::default().position(Corner::LeftTop))
        // The dashboard scrolls; wheel events belong to the page
        .allow_scroll(false)
}

// ============================================================================
// ChartView
// ============================================================================

/// Owns per-chart UI state across frames.
#[derive(Default)]
pub struct ChartView {
    /// Raw chart window, tied to the ticker and length it was built for
    raw_window: Option<(String, usize, RangeWindow)>,
}

impl ChartView {
    pub fn new() -> Self {
        Self { raw_window: None }
    }

    fn window_for(&mut self, series: &PriceSeries) -> RangeWindow {
        match &self.raw_window {
            Some((ticker, len, window)) if ticker == series.ticker() && *len == series.len() => *window,
            _ => {
                let window = RangeWindow::full(series.len());
                self.raw_window = Some((series.ticker().to_string(), series.len(), window));
                window
            }
        }
    }

    fn set_window(&mut self, series: &PriceSeries, window: RangeWindow) {
        self.raw_window = Some((
            series.ticker().to_string(),
            series.len(),
            window.clamped(series.len()),
        ));
    }

    /// Open vs close with preset buttons and start/end sliders.
    pub fn show_raw_chart(&mut self, ui: &mut Ui, series: &PriceSeries) {
        let bars = series.bars();
        let mut window = self.window_for(series);

        ui.horizontal(|ui| {
            for preset in RangePreset::iter() {
                if ui.button(preset.to_string()).clicked() {
                    window = RangeWindow::from_preset(preset, bars);

                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Raw chart range preset: {}", preset);
                    }
                }
            }
        });

        let max_index = bars.len().saturating_sub(1);
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.range_start_label);
            ui.add(Slider::new(&mut window.start, 0..=max_index).show_value(false));
            ui.label(format_date(bars[window.start.min(max_index)].date));
            ui.add_space(12.0);
            ui.label_subdued(UI_TEXT.range_end_label);
            ui.add(Slider::new(&mut window.end, 0..=max_index).show_value(false));
            ui.label(format_date(bars[window.end.min(max_index)].date));
        });
        if window.start > window.end {
            std::mem::swap(&mut window.start, &mut window.end);
        }
        self.set_window(series, window);

        let visible = window.slice(bars);
        let opens = bar_points(visible, |bar| bar.open);
        let closes = bar_points(visible, |bar| bar.close);

        base_plot("raw_chart", PLOT_CONFIG.chart_height)
            .custom_x_axes(vec![date_axis()])
            .custom_y_axes(vec![price_axis(format!("{} {}", series.ticker(), UI_TEXT.plot_y_axis))])
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(UI_TEXT.series_open, PlotPoints::new(opens))
                        .color(PLOT_CONFIG.open_color)
                        .width(PLOT_CONFIG.line_width),
                );
                plot_ui.line(
                    Line::new(UI_TEXT.series_close, PlotPoints::new(closes))
                        .color(PLOT_CONFIG.close_color)
                        .width(PLOT_CONFIG.line_width),
                );
            });
    }

    /// History points, estimate line and uncertainty band.
    pub fn show_forecast_chart(&self, ui: &mut Ui, series: &PriceSeries, forecast: &Forecast) {
        base_plot("forecast_chart", PLOT_CONFIG.chart_height)
            .custom_x_axes(vec![date_axis()])
            .custom_y_axes(vec![price_axis(format!("{} {}", series.ticker(), UI_TEXT.plot_y_axis))])
            .show(ui, |plot_ui| {
                let ctx = LayerContext { series, forecast };

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(UncertaintyBandLayer),
                    Box::new(ActualPointsLayer),
                    Box::new(EstimateLayer),
                    Box::new(HorizonMarkerLayer),
                ];

                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });
    }

    /// Trend with its band, then the weekly and yearly profiles.
    pub fn show_components(&self, ui: &mut Ui, forecast: &Forecast) {
        ui.label_subheader(ForecastComponent::Trend.to_string());
        base_plot("component_trend", PLOT_CONFIG.component_chart_height)
            .custom_x_axes(vec![date_axis()])
            .show(ui, |plot_ui| {
                let bounds: Vec<(f64, f64, f64)> = forecast
                    .rows
                    .iter()
                    .map(|row| (date_to_x(row.date), row.trend_lower, row.trend_upper))
                    .collect();
                draw_band(plot_ui, UI_TEXT.series_trend_band, &bounds, PLOT_CONFIG.band_fill_color);
                plot_ui.line(
                    Line::new(
                        UI_TEXT.series_trend,
                        PlotPoints::new(component_points(forecast, ForecastComponent::Trend)),
                    )
                    .color(PLOT_CONFIG.trend_color)
                    .width(PLOT_CONFIG.line_width),
                );
            });

        ui.add_space(8.0);
        ui.label_subheader(ForecastComponent::Weekly.to_string());
        if !forecast.profiles.weekly_enabled {
            ui.label_subdued(UI_TEXT.seasonality_disabled);
        }
        self.show_profile(
            ui,
            "component_weekly",
            UI_TEXT.series_weekly,
            &forecast.profiles.weekly,
            |x| {
                let i = x.round();
                if (x - i).abs() < 1e-6 && (0.0..7.0).contains(&i) {
                    WEEKDAY_LABELS[i as usize].to_string()
                } else {
                    String::new()
                }
            },
        );

        ui.add_space(8.0);
        ui.label_subheader(ForecastComponent::Yearly.to_string());
        if !forecast.profiles.yearly_enabled {
            ui.label_subdued(UI_TEXT.seasonality_disabled);
        }
        self.show_profile(
            ui,
            "component_yearly",
            UI_TEXT.series_yearly,
            &forecast.profiles.yearly,
            |x| {
                // Profile starts on 1 January of a non-leap year
                NaiveDate::from_ymd_opt(2017, 1, 1)
                    .map(|d| d + Duration::days(x.round() as i64))
                    .map(|d| d.format("%B %-d").to_string())
                    .unwrap_or_default()
            },
        );
    }

    fn show_profile(
        &self,
        ui: &mut Ui,
        id: &str,
        name: &str,
        profile: &[f64],
        x_label: impl Fn(f64) -> String + 'static,
    ) {
        let mut plot = base_plot(id, PLOT_CONFIG.component_chart_height).custom_x_axes(vec![
            AxisHints::new_x().formatter(move |grid_mark, _range| x_label(grid_mark.value)),
        ]);
        if let Some((low, high)) = padded_bounds(profile, 0.1) {
            plot = plot.include_y(low).include_y(high);
        }
        plot.show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(name, PlotPoints::new(profile_points(profile)))
                    .color(PLOT_CONFIG.seasonal_color)
                    .width(PLOT_CONFIG.line_width),
            );
        });
    }

    /// Close price line over the whole history.
    pub fn show_history_chart(&self, ui: &mut Ui, series: &PriceSeries) {
        let closes = bar_points(series.bars(), |bar| bar.close);
        base_plot("history_chart", PLOT_CONFIG.chart_height)
            .custom_x_axes(vec![date_axis()])
            .custom_y_axes(vec![price_axis(UI_TEXT.series_close_price.to_string())])
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(UI_TEXT.series_close_price, PlotPoints::new(closes))
                        .color(PLOT_CONFIG.close_color)
                        .width(PLOT_CONFIG.line_width),
                );
            });
    }
}

/// Shared egui id prefix so charts of different tickers do not share zoom state.
pub fn chart_scope(ui: &mut Ui, ticker: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.push_id(egui::Id::new(("charts", ticker)), add_contents);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{AdditiveForecaster, Forecaster};
    use crate::models::price_series::tests::{bar_on, day, series_from_closes};

    fn daily_bars(start: NaiveDate, n: usize) -> Vec<PriceBar> {
        (0..n)
            .map(|i| bar_on(start + Duration::days(i as i64), 100.0 + i as f64))
            .collect()
    }

    #[test]
    fn presets_select_trailing_windows() {
        // 2023-01-01 ..= 2024-06-30
        let bars = daily_bars(day(2023, 1, 1), 547);
        let last = bars[bars.len() - 1].date;
        assert_eq!(last, day(2024, 6, 30));

        let month = RangeWindow::from_preset(RangePreset::OneMonth, &bars);
        assert_eq!(bars[month.start].date, day(2024, 5, 30));
        assert_eq!(month.end, bars.len() - 1);

        let ytd = RangeWindow::from_preset(RangePreset::YearToDate, &bars);
        assert_eq!(bars[ytd.start].date, day(2024, 1, 1));

        let year = RangeWindow::from_preset(RangePreset::OneYear, &bars);
        assert_eq!(bars[year.start].date, day(2023, 6, 30));

        assert_eq!(RangeWindow::from_preset(RangePreset::All, &bars), RangeWindow::full(547));
    }

    #[test]
    fn preset_longer_than_history_keeps_everything() {
        let bars = daily_bars(day(2024, 6, 1), 10);
        let window = RangeWindow::from_preset(RangePreset::SixMonths, &bars);
        assert_eq!(window, RangeWindow::full(10));
        assert_eq!(window.slice(&bars).len(), 10);
    }

    #[test]
    fn window_is_clamped_to_series() {
        let window = RangeWindow { start: 8, end: 50 }.clamped(5);
        assert_eq!(window, RangeWindow { start: 4, end: 4 });
        let bars = daily_bars(day(2024, 1, 1), 5);
        assert_eq!(RangeWindow { start: 1, end: 2 }.slice(&bars).len(), 2);
        assert!(RangeWindow::full(0).slice(&[]).is_empty());
    }

    #[test]
    fn builders_use_epoch_day_x() {
        let series = series_from_closes("AAPL", day(2024, 1, 2), &[10.0, 11.0]);
        let points = bar_points(series.bars(), |bar| bar.close);
        assert_eq!(points, vec![[19_724.0, 10.0], [19_725.0, 11.0]]);

        let forecast = AdditiveForecaster::new()
            .fit(&series.training_pairs())
            .unwrap()
            .predict(3);
        let trend = component_points(&forecast, ForecastComponent::Trend);
        assert_eq!(trend.len(), forecast.len());
        assert_eq!(trend[4][0], 19_728.0);

        let weekly = profile_points(&forecast.profiles.weekly);
        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[6][0], 6.0);
    }

    #[test]
    fn preset_labels() {
        let labels: Vec<String> = RangePreset::iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["1M", "6M", "YTD", "1Y", "All"]);
    }
}
