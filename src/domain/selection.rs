use serde::{Deserialize, Serialize};

use crate::config::{HORIZON, catalog::default_ticker};

/// Number of whole years to project, constrained to the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HorizonYears(u32);

impl HorizonYears {
    /// Clamps into `HORIZON.min_years..=HORIZON.max_years`.
    pub fn new(years: u32) -> Self {
        Self(years.clamp(HORIZON.min_years, HORIZON.max_years))
    }

    pub fn years(&self) -> u32 {
        self.0
    }

    /// Horizon in calendar days using a fixed 365-day year (leap years ignored).
    pub fn days(&self) -> u32 {
        self.0 * HORIZON.days_per_year
    }
}

impl Default for HorizonYears {
    fn default() -> Self {
        Self::new(HORIZON.default_years)
    }
}

/// What the user currently has selected. Any change re-runs the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserSelection {
    pub ticker: String,
    pub horizon: HorizonYears,
}

impl UserSelection {
    pub fn new(ticker: impl Into<String>, horizon_years: u32) -> Self {
        Self {
            ticker: ticker.into(),
            horizon: HorizonYears::new(horizon_years),
        }
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon.days()
    }
}

impl Default for UserSelection {
    fn default() -> Self {
        Self {
            ticker: default_ticker().to_string(),
            horizon: HorizonYears::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_conversion_uses_fixed_year() {
        assert_eq!(UserSelection::new("AAPL", 1).horizon_days(), 365);
        assert_eq!(UserSelection::new("AAPL", 2).horizon_days(), 730);
        assert_eq!(UserSelection::new("AAPL", 4).horizon_days(), 1460);
    }

    #[test]
    fn horizon_is_clamped_to_slider_range() {
        assert_eq!(HorizonYears::new(0).years(), 1);
        assert_eq!(HorizonYears::new(9).years(), 4);
        assert_eq!(HorizonYears::default().years(), 1);
    }

    #[test]
    fn default_selection_is_first_catalog_entry() {
        let selection = UserSelection::default();
        assert_eq!(selection.ticker, "AAPL");
        assert_eq!(selection.horizon_days(), 365);
    }
}
