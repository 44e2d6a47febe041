//! Static ticker catalog: symbol -> company display name.
//!
//! Populates the ticker selector and labels the statistics panel. Changing the
//! list requires a rebuild; there is no runtime update mechanism.

/// Every ticker offered by the selector, in display order.
pub const TICKER_CATALOG: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com, Inc."),
    ("TSLA", "Tesla, Inc."),
    ("META", "Meta Platforms, Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("BRK-B", "Berkshire Hathaway Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("JNJ", "Johnson & Johnson"),
    ("V", "Visa Inc."),
    ("UNH", "UnitedHealth Group Incorporated"),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble Co."),
    ("DIS", "The Walt Disney Company"),
    ("MA", "Mastercard Incorporated"),
    ("HD", "The Home Depot, Inc."),
    ("VZ", "Verizon Communications Inc."),
    ("ADBE", "Adobe Inc."),
    ("NFLX", "Netflix, Inc."),
    ("PYPL", "PayPal Holdings, Inc."),
    ("CRM", "Salesforce.com, Inc."),
    ("CSCO", "Cisco Systems, Inc."),
    ("IBM", "International Business Machines Corporation"),
    ("INTC", "Intel Corporation"),
    ("ORCL", "Oracle Corporation"),
    ("QCOM", "QUALCOMM Incorporated"),
    ("MCD", "McDonald's Corporation"),
    ("KO", "The Coca-Cola Company"),
    ("PEP", "PepsiCo, Inc."),
    ("NKE", "NIKE, Inc."),
    ("SBUX", "Starbucks Corporation"),
    ("CMCSA", "Comcast Corporation"),
    ("GOOG", "Alphabet Inc. (Class C)"),
    ("CVX", "Chevron Corporation"),
    ("XOM", "Exxon Mobil Corporation"),
    ("ABBV", "AbbVie Inc."),
    ("MRK", "Merck & Co., Inc."),
    ("ABB", "ABB Ltd"),
    ("NVO", "Novo Nordisk A/S"),
    ("TM", "Toyota Motor Corporation"),
    ("TSM", "Taiwan Semiconductor Manufacturing Company Limited"),
    ("LMT", "Lockheed Martin Corporation"),
    ("BA", "The Boeing Company"),
    ("GM", "General Motors Company"),
    ("F", "Ford Motor Company"),
    ("BABA", "Alibaba Group Holding Limited"),
    ("JD", "JD.com, Inc."),
    ("T", "AT&T Inc."),
    ("AMGN", "Amgen Inc."),
    ("GILD", "Gilead Sciences, Inc."),
];

/// Company name for a catalog ticker.
pub fn company_name(ticker: &str) -> Option<&'static str> {
    TICKER_CATALOG
        .iter()
        .find(|(symbol, _)| *symbol == ticker)
        .map(|(_, name)| *name)
}

/// Ticker selected on first start.
pub fn default_ticker() -> &'static str {
    TICKER_CATALOG[0].0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_symbols_are_unique() {
        let symbols: HashSet<&str> = TICKER_CATALOG.iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols.len(), TICKER_CATALOG.len());
        assert_eq!(TICKER_CATALOG.len(), 51);
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(company_name("AAPL"), Some("Apple Inc."));
        assert_eq!(company_name("BRK-B"), Some("Berkshire Hathaway Inc."));
        assert_eq!(company_name("UNKNOWN_XYZ"), None);
        assert_eq!(company_name("aapl"), None);
        assert_eq!(default_ticker(), "AAPL");
    }
}
