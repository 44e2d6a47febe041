//! Tail tables and the statistics summary.
//!
//! Builders produce plain strings so they can be tested without a UI; `show`
//! draws the result into an `egui::Grid`.

use eframe::egui::{Grid, RichText, Ui};

use crate::engine::DashboardReport;
use crate::models::{DailyChange, Forecast, MarketSnapshot, PriceSeries};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_change, format_price, format_thousands, format_value};
use crate::utils::time_utils::format_date;

/// A small read-only table: header row plus formatted cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Column holding signed changes, colored by sign
    pub signed_column: Option<usize>,
}

impl TableView {
    /// Last `n` price bars.
    pub fn price_tail(series: &PriceSeries, n: usize) -> Self {
        let rows = series
            .tail(n)
            .iter()
            .map(|bar| {
                vec![
                    format_date(bar.date),
                    format_value(bar.open),
                    format_value(bar.high),
                    format_value(bar.low),
                    format_value(bar.close),
                    bar.volume.to_string(),
                ]
            })
            .collect();
        Self {
            headers: vec!["Date", "Open", "High", "Low", "Close", "Volume"],
            rows,
            signed_column: None,
        }
    }

    /// Last `n` forecast rows (always projected dates when the horizon is >= n).
    pub fn forecast_tail(forecast: &Forecast, n: usize) -> Self {
        let rows = forecast
            .tail(n)
            .iter()
            .map(|row| {
                vec![
                    format_date(row.date),
                    format_value(row.estimate),
                    format_value(row.lower),
                    format_value(row.upper),
                    format_value(row.trend),
                    format_value(row.weekly),
                    format_value(row.yearly),
                ]
            })
            .collect();
        Self {
            headers: vec!["Date", "Estimate", "Lower", "Upper", "Trend", "Weekly", "Yearly"],
            rows,
            signed_column: None,
        }
    }

    /// Last `n` daily changes; the first day of history shows as missing.
    pub fn daily_change_tail(changes: &[DailyChange], n: usize) -> Self {
        let rows = changes[changes.len().saturating_sub(n)..]
            .iter()
            .map(|c| vec![format_date(c.date), format_change(c.change)])
            .collect();
        Self {
            headers: vec!["Date", "Daily Change"],
            rows,
            signed_column: Some(1),
        }
    }

    pub fn show(&self, ui: &mut Ui, id: &str) {
        Grid::new(id)
            .striped(true)
            .num_columns(self.headers.len())
            .spacing([18.0, 4.0])
            .show(ui, |ui| {
                for header in &self.headers {
                    ui.label(RichText::new(*header).strong());
                }
                ui.end_row();

                for row in &self.rows {
                    for (column, cell) in row.iter().enumerate() {
                        if self.signed_column == Some(column) {
                            ui.label_signed_cell(cell);
                        } else {
                            ui.label(RichText::new(cell).monospace());
                        }
                    }
                    ui.end_row();
                }
            });
    }
}

/// One "label: value" line of the statistics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

/// Company name, ticker, market cap and 52-week range.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub lines: Vec<StatLine>,
}

impl StatsSummary {
    pub fn new(company_name: &str, ticker: &str, snapshot: &MarketSnapshot) -> Self {
        let line = |label, value| StatLine { label, value };
        Self {
            lines: vec![
                line(UI_TEXT.stats_company, company_name.to_string()),
                line(UI_TEXT.stats_ticker, ticker.to_string()),
                line(UI_TEXT.stats_market_cap, format_thousands(snapshot.market_cap)),
                line(UI_TEXT.stats_52w_high, format_price(snapshot.week52_high)),
                line(UI_TEXT.stats_52w_low, format_price(snapshot.week52_low)),
            ],
        }
    }

    pub fn from_report(report: &DashboardReport) -> Self {
        Self::new(
            &report.company_name,
            &report.selection.ticker,
            &report.snapshot,
        )
    }

    pub fn show(&self, ui: &mut Ui) {
        for line in &self.lines {
            ui.metric(line.label, &line.value, UI_CONFIG.colors.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{AdditiveForecaster, Forecaster};
    use crate::models::price_series::tests::{day, series_from_closes};

    #[test]
    fn price_tail_shows_last_rows_in_order() {
        let series = series_from_closes("AAPL", day(2024, 1, 1), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let table = TableView::price_tail(&series, UI_CONFIG.table_rows);

        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows[0][0], "2024-01-03");
        assert_eq!(table.rows[4][0], "2024-01-07");
        assert_eq!(table.rows[4][4], "7.00");
        assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));
    }

    #[test]
    fn short_series_shows_every_row() {
        let series = series_from_closes("AAPL", day(2024, 1, 1), &[1.0, 2.0]);
        assert_eq!(TableView::price_tail(&series, 5).rows.len(), 2);
    }

    #[test]
    fn daily_change_tail_marks_first_day_missing() {
        let series = series_from_closes("AAPL", day(2024, 1, 1), &[10.0, 10.5, 9.5]);
        let table = TableView::daily_change_tail(&series.daily_changes(), 5);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0], vec!["2024-01-01".to_string(), "n/a".to_string()]);
        assert_eq!(table.rows[1][1], "+0.50");
        assert_eq!(table.rows[2][1], "-1.00");
        assert_eq!(table.signed_column, Some(1));
    }

    #[test]
    fn forecast_tail_ends_at_horizon() {
        let series = series_from_closes("AAPL", day(2024, 1, 1), &[10.0, 11.0, 12.0, 13.0]);
        let forecast = AdditiveForecaster::new()
            .fit(&series.training_pairs())
            .unwrap()
            .predict(365);
        let table = TableView::forecast_tail(&forecast, 5);

        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[4][0], "2025-01-03");
        assert_eq!(table.headers[1], "Estimate");
    }

    #[test]
    fn stats_summary_formats_snapshot() {
        let snapshot = MarketSnapshot {
            market_cap: 3_450_000_000_000,
            week52_high: 237.23,
            week52_low: 164.08,
        };
        let summary = StatsSummary::new("Apple Inc.", "AAPL", &snapshot);
        let values: Vec<&str> = summary.lines.iter().map(|l| l.value.as_str()).collect();

        assert_eq!(
            values,
            vec!["Apple Inc.", "AAPL", "3,450,000,000,000", "$237.23", "$164.08"]
        );
        assert_eq!(summary.lines[2].label, "Market Cap");
    }
}
