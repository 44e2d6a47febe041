use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PROVIDER;
use crate::domain::UserSelection;
use crate::models::{DailyChange, Forecast, MarketSnapshot, PriceSeries};
use crate::utils::time_utils::parse_config_date;

/// Window used when the configured start date does not parse or lies in the future.
const FALLBACK_HISTORY_DAYS: i64 = 365 * 5;

/// One pipeline run: what to show and which history window to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub selection: UserSelection,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PipelineRequest {
    /// History from the configured start date up to `today`.
    pub fn up_to(selection: UserSelection, today: NaiveDate) -> Self {
        let start = match parse_config_date(PROVIDER.history.start_date) {
            Some(start) if start <= today => start,
            _ => {
                log::warn!(
                    "History start {:?} is invalid, fetching the last {} days instead",
                    PROVIDER.history.start_date,
                    FALLBACK_HISTORY_DAYS
                );
                today - chrono::Duration::days(FALLBACK_HISTORY_DAYS)
            }
        };
        Self {
            selection,
            start,
            end: today,
        }
    }
}

/// Everything the dashboard renders for one run.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub selection: UserSelection,
    /// Falls back to the ticker itself when not in the catalog
    pub company_name: String,
    pub series: Arc<PriceSeries>,
    pub snapshot: MarketSnapshot,
    pub forecast: Forecast,
    pub daily_changes: Vec<DailyChange>,
    /// Whether a previously fitted model was reused
    pub model_reused: bool,
    pub elapsed: Duration,
}

impl DashboardReport {
    pub fn horizon_years(&self) -> u32 {
        self.selection.horizon.years()
    }
}
