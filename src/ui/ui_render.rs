use eframe::egui::{
    CentralPanel, Context, Frame, Margin, ScrollArea, SidePanel, Spinner, TopBottomPanel, Ui,
};

use crate::engine::DashboardReport;
use crate::ui::charts::chart_scope;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::tables::{StatsSummary, TableView};
use crate::ui::ui_panels::{Panel, SelectionPanel, apply_selection_events};
use crate::ui::utils::{section_heading, spaced_separator};
use crate::utils::time_utils::how_long_ago;

use super::app::StockForecastApp;

/// One block of the central dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DashboardSection {
    RawData,
    RawChart,
    Stats,
    ForecastData,
    ForecastChart,
    Components,
    DailyChange,
    HistoricalChart,
}

/// Top-to-bottom layout of the dashboard.
pub(crate) const DASHBOARD_SECTIONS: [DashboardSection; 8] = [
    DashboardSection::RawData,
    DashboardSection::RawChart,
    DashboardSection::Stats,
    DashboardSection::ForecastData,
    DashboardSection::ForecastChart,
    DashboardSection::Components,
    DashboardSection::DailyChange,
    DashboardSection::HistoricalChart,
];

impl DashboardSection {
    pub(crate) fn heading(self, horizon_years: u32) -> String {
        match self {
            Self::RawData => UI_TEXT.raw_data_heading.to_string(),
            Self::RawChart => UI_TEXT.raw_chart_heading.to_string(),
            Self::Stats => UI_TEXT.stats_heading.to_string(),
            Self::ForecastData => UI_TEXT.forecast_data_heading.to_string(),
            Self::ForecastChart => format!(
                "{}{}{}",
                UI_TEXT.forecast_plot_prefix, horizon_years, UI_TEXT.forecast_plot_suffix
            ),
            Self::Components => UI_TEXT.components_heading.to_string(),
            Self::DailyChange => UI_TEXT.daily_change_heading.to_string(),
            Self::HistoricalChart => UI_TEXT.historical_chart_heading.to_string(),
        }
    }

    /// A separator follows the last section of each group.
    pub(crate) fn ends_group(self) -> bool {
        matches!(self, Self::Stats | Self::Components)
    }
}

impl StockForecastApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.label_header(UI_TEXT.app_title);
                ui.add_space(5.0);
                ui.label(UI_TEXT.welcome_text);
                spaced_separator(ui);

                let mut panel = SelectionPanel::new(&self.selection);
                let events = panel.render(ui);
                if apply_selection_events(&mut self.selection, &events) {
                    self.on_selection_changed();
                }
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if let Some(error) = &self.last_error {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.label_header(UI_TEXT.error_heading);
                        ui.add_space(10.0);
                        ui.label_error(error.to_string());
                        ui.add_space(10.0);
                        ui.label_subdued(UI_TEXT.error_hint);
                    });
                    return;
                }

                let Some(report) = self.report.clone() else {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.add(Spinner::new());
                        ui.label(UI_TEXT.loading);
                    });
                    return;
                };

                ScrollArea::vertical()
                    .id_salt("dashboard")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(4.0);
                        chart_scope(ui, &report.selection.ticker, |ui| {
                            self.render_dashboard(ui, &report);
                        });
                        ui.add_space(20.0);
                    });
            });
    }

    /// Every panel for one report, in `DASHBOARD_SECTIONS` order.
    fn render_dashboard(&mut self, ui: &mut Ui, report: &DashboardReport) {
        let rows = UI_CONFIG.table_rows;

        for section in DASHBOARD_SECTIONS {
            section_heading(ui, section.heading(report.horizon_years()));
            match section {
                DashboardSection::RawData => {
                    TableView::price_tail(&report.series, rows).show(ui, "raw_data_table")
                }
                DashboardSection::RawChart => self.chart_view.show_raw_chart(ui, &report.series),
                DashboardSection::Stats => StatsSummary::from_report(report).show(ui),
                DashboardSection::ForecastData => {
                    TableView::forecast_tail(&report.forecast, rows).show(ui, "forecast_table")
                }
                DashboardSection::ForecastChart => self
                    .chart_view
                    .show_forecast_chart(ui, &report.series, &report.forecast),
                DashboardSection::Components => self.chart_view.show_components(ui, &report.forecast),
                DashboardSection::DailyChange => {
                    TableView::daily_change_tail(&report.daily_changes, rows)
                        .show(ui, "daily_change_table")
                }
                DashboardSection::HistoricalChart => {
                    self.chart_view.show_history_chart(ui, &report.series)
                }
            }
            if section.ends_group() {
                spaced_separator(ui);
            }
        }
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // 1. Loading state
                    if self.is_running() {
                        ui.add(Spinner::new().size(12.0));
                        ui.label_status(UI_TEXT.loading, true);
                    } else if self.last_run.is_some() {
                        ui.label_status(UI_TEXT.loading_done, false);
                    }
                    ui.separator();

                    // 2. Last run
                    if let Some(last_run) = &self.last_run {
                        let ago = how_long_ago(last_run.finished.elapsed().as_secs() as i64);
                        ui.label_subdued(format!(
                            "{} {} ({})",
                            UI_TEXT.last_run_prefix, last_run.clock, ago
                        ));
                        ui.separator();
                    }

                    // 3. Run details
                    if let Some(report) = &self.report {
                        ui.label_subdued(format!(
                            "{} | {} bars | {:.2}s",
                            report.selection.ticker,
                            report.series.len(),
                            report.elapsed.as_secs_f32()
                        ));
                        if report.model_reused {
                            ui.label_subdued(UI_TEXT.model_reused_note);
                        }
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_render_in_fixed_order() {
        let headings: Vec<String> = DASHBOARD_SECTIONS.iter().map(|s| s.heading(2)).collect();
        assert_eq!(
            headings,
            vec![
                "Raw Data",
                "Time Series Data with Rangeslider",
                "Stock Statistics",
                "Forecast Data",
                "Forecast plot for 2 years",
                "Forecast components",
                "Daily Price Change",
                "Historical Closing Prices",
            ]
        );
    }

    #[test]
    fn separators_split_three_groups() {
        let breaks: Vec<usize> = DASHBOARD_SECTIONS
            .iter()
            .enumerate()
            .filter(|(_, s)| s.ends_group())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(breaks, vec![2, 5]);
    }
}
