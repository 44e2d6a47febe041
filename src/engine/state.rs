use std::sync::Arc;
use std::time::Instant;

use crate::forecast::AdditiveModel;
use crate::models::PriceSeries;

/// The last model fitted for a ticker, with the history it was fitted on.
#[derive(Debug, Clone)]
pub struct TickerState {
    /// Replaced wholesale when a newer history arrives; readers keep their Arc.
    pub model: Arc<AdditiveModel>,
    pub series: Arc<PriceSeries>,
    pub fitted_at: Instant,
}

impl TickerState {
    pub fn new(model: Arc<AdditiveModel>, series: Arc<PriceSeries>) -> Self {
        Self {
            model,
            series,
            fitted_at: Instant::now(),
        }
    }

    /// A model is reusable only for the exact history it was fitted on.
    /// The memoized provider hands back the same Arc, so the bar comparison
    /// only runs for unmemoized providers.
    pub fn is_current_for(&self, series: &Arc<PriceSeries>) -> bool {
        Arc::ptr_eq(&self.series, series) || self.series.as_ref() == series.as_ref()
    }
}
