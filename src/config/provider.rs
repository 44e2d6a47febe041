//! Market-data provider configuration (Yahoo Finance).

/// Endpoints used by the Yahoo adapter.
pub struct YahooEndpoints {
    /// Any response from here sets the session cookie the crumb is bound to
    pub cookie_url: &'static str,
    /// Plain-text crumb for the current session cookie
    pub crumb_url: &'static str,
    /// Daily OHLCV bars: `{chart_url}/{ticker}?period1=..&period2=..&interval=1d`
    pub chart_url: &'static str,
    /// Scalar snapshot fields: `{quote_url}?symbols={ticker}&crumb={crumb}`
    pub quote_url: &'static str,
}

/// HTTP client defaults
pub struct ClientDefaults {
    /// Whole-request timeout. Yahoo sometimes hangs instead of failing.
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

/// History window requested for every ticker
pub struct HistoryWindow {
    /// First day of history, `%Y-%m-%d`
    pub start_date: &'static str,
}

/// The Master Provider Configuration
pub struct ProviderConfig {
    pub yahoo: YahooEndpoints,
    pub client: ClientDefaults,
    pub history: HistoryWindow,
}

pub const PROVIDER: ProviderConfig = ProviderConfig {
    yahoo: YahooEndpoints {
        cookie_url: "https://fc.yahoo.com",
        crumb_url: "https://query1.finance.yahoo.com/v1/test/getcrumb",
        chart_url: "https://query1.finance.yahoo.com/v8/finance/chart",
        quote_url: "https://query1.finance.yahoo.com/v7/finance/quote",
    },
    client: ClientDefaults {
        timeout_ms: 10_000,
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    },
    history: HistoryWindow {
        start_date: "2018-01-01",
    },
};
