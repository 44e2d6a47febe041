//! Error types for the data provider layer.

use chrono::NaiveDate;
use std::fmt;

/// Failures of a price-history or snapshot request.
///
/// Both variants are terminal for the current interaction: nothing is retried
/// and no partial series is handed on.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// Unknown ticker, unreachable upstream, timeout or malformed payload.
    DataUnavailable { ticker: String, reason: String },
    /// Valid ticker but no observations in the requested range.
    EmptySeries {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl DataError {
    pub fn unavailable(ticker: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }

    pub fn ticker(&self) -> &str {
        match self {
            Self::DataUnavailable { ticker, .. } | Self::EmptySeries { ticker, .. } => ticker,
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable { ticker, reason } => {
                write!(f, "Data unavailable for {}: {}", ticker, reason)
            }
            Self::EmptySeries { ticker, start, end } => {
                write!(f, "No price data for {} between {} and {}", ticker, start, end)
            }
        }
    }
}

impl std::error::Error for DataError {}
