//! Yahoo Finance adapter.
//!
//! Daily bars come from the v8 chart endpoint, snapshot fields from the v7
//! quote endpoint, which also needs a session crumb. Every transport or
//! payload problem is reported as `DataError::DataUnavailable`; an empty
//! range as `DataError::EmptySeries`.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::PROVIDER;
use crate::data::{DataError, PriceProvider};
use crate::domain::PriceBar;
use crate::models::{MarketSnapshot, PriceSeries};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

// ----------------------------------------------------------------------------
// Wire format
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    // Absent when the range holds no trading days
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds; bars are stamped at the local open
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    quote_response: QuoteEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(default)]
    result: Vec<QuoteItem>,
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteItem {
    symbol: String,
    market_cap: Option<u64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
}

// ----------------------------------------------------------------------------
// Parsing
// ----------------------------------------------------------------------------

/// Extracts complete bars from a chart payload. Bars with any missing field are skipped.
fn parse_chart(body: &str) -> Result<Vec<PriceBar>> {
    let response: ChartResponse =
        serde_json::from_str(body).context("Failed to parse chart response")?;

    if let Some(error) = response.chart.error {
        bail!("provider error [{}]: {}", error.code, error.description);
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| anyhow!("chart response holds no result"))?;
    let columns = data
        .indicators
        .quote
        .first()
        .ok_or_else(|| anyhow!("chart response holds no quote columns"))?;

    let offset = data.meta.gmtoffset;
    let bars = data
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            let open = columns.open.get(i).copied().flatten()?;
            let high = columns.high.get(i).copied().flatten()?;
            let low = columns.low.get(i).copied().flatten()?;
            let close = columns.close.get(i).copied().flatten()?;
            let volume = columns.volume.get(i).copied().flatten()?;
            Some(PriceBar::new(date, open, high, low, close, volume))
        })
        .collect();

    Ok(bars)
}

fn parse_quote(body: &str, ticker: &str) -> Result<MarketSnapshot> {
    let response: QuoteResponse =
        serde_json::from_str(body).context("Failed to parse quote response")?;

    if let Some(error) = response.quote_response.error {
        bail!("provider error [{}]: {}", error.code, error.description);
    }

    let item = response
        .quote_response
        .result
        .into_iter()
        .find(|item| item.symbol.eq_ignore_ascii_case(ticker))
        .ok_or_else(|| anyhow!("no quote returned for {}", ticker))?;

    Ok(MarketSnapshot {
        market_cap: item.market_cap.context("quote is missing marketCap")?,
        week52_high: item
            .fifty_two_week_high
            .context("quote is missing fiftyTwoWeekHigh")?,
        week52_low: item
            .fifty_two_week_low
            .context("quote is missing fiftyTwoWeekLow")?,
    })
}

/// Unix seconds at UTC midnight.
fn date_to_unix(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

/// Full URLs of every endpoint the client talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub cookie_url: String,
    pub crumb_url: String,
    pub chart_url: String,
    pub quote_url: String,
}

impl Endpoints {
    fn production() -> Self {
        Self {
            cookie_url: PROVIDER.yahoo.cookie_url.to_string(),
            crumb_url: PROVIDER.yahoo.crumb_url.to_string(),
            chart_url: PROVIDER.yahoo.chart_url.to_string(),
            quote_url: PROVIDER.yahoo.quote_url.to_string(),
        }
    }
}

/// Yahoo Finance client.
///
/// The quote endpoint rejects requests without a crumb bound to the session
/// cookie, so the client keeps a cookie store and caches the crumb until the
/// server answers 401.
#[derive(Debug, Clone)]
pub struct YahooProvider {
    http: reqwest::Client,
    endpoints: Endpoints,
    crumb: Arc<Mutex<Option<String>>>,
}

impl YahooProvider {
    /// Client against the production endpoints.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(Endpoints::production())
    }

    /// Client against arbitrary endpoints (mock servers in tests).
    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(PROVIDER.client.user_agent)
            .timeout(std::time::Duration::from_millis(PROVIDER.client.timeout_ms))
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoints,
            crumb: Arc::new(Mutex::new(None)),
        })
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await.context("request failed")?;
        let status = response.status();
        let body = response.text().await.context("failed to read response body")?;
        Ok((status, body))
    }

    /// Cached crumb, or a new session when none is cached or `stale` matches the cache.
    async fn crumb(&self, stale: Option<&str>) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        match cached.as_deref() {
            Some(crumb) if Some(crumb) != stale => return Ok(crumb.to_string()),
            _ => {}
        }

        let crumb = self.open_session().await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn open_session(&self) -> Result<String> {
        // Only the Set-Cookie header matters; the cookie host answers 404
        self.http
            .get(&self.endpoints.cookie_url)
            .send()
            .await
            .context("cookie request failed")?;

        let (status, body) = self
            .get_text(self.http.get(&self.endpoints.crumb_url))
            .await
            .context("crumb request failed")?;
        if !status.is_success() {
            bail!("crumb request failed: HTTP {}", status);
        }
        let crumb = body.trim();
        if crumb.is_empty() || crumb.contains(char::is_whitespace) || crumb.starts_with('<') {
            bail!("crumb response holds no crumb");
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_cache_events {
            log::info!("New {} session crumb", self.signature());
        }
        Ok(crumb.to_string())
    }

    async fn fetch_chart(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<PriceBar>> {
        let period1 = date_to_unix(start);
        // period2 is exclusive upstream
        let period2 = date_to_unix(end + Duration::days(1));
        let request = self
            .http
            .get(format!("{}/{}", self.endpoints.chart_url, ticker))
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ]);

        let (status, body) = self.get_text(request).await?;
        if !status.is_success() {
            // Unknown tickers come back as 404 with an error object worth surfacing
            return match parse_chart(&body) {
                Err(e) => Err(e.context(format!("HTTP {}", status))),
                Ok(_) => bail!("HTTP {}", status),
            };
        }
        parse_chart(&body)
    }

    async fn get_quote(&self, ticker: &str, crumb: &str) -> Result<(StatusCode, String)> {
        let request = self
            .http
            .get(&self.endpoints.quote_url)
            .query(&[("symbols", ticker), ("crumb", crumb)]);
        self.get_text(request).await
    }

    async fn fetch_quote(&self, ticker: &str) -> Result<MarketSnapshot> {
        let crumb = self.crumb(None).await?;
        let (mut status, mut body) = self.get_quote(ticker, &crumb).await?;

        // Sessions expire; one refresh per request
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{}: quote rejected the crumb, refreshing the session", ticker);
            let fresh = self.crumb(Some(&crumb)).await?;
            (status, body) = self.get_quote(ticker, &fresh).await?;
        }

        if !status.is_success() {
            bail!("HTTP {}", status);
        }
        parse_quote(&body, ticker)
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, DataError> {
        let bars = self
            .fetch_chart(ticker, start, end)
            .await
            .map_err(|e| DataError::unavailable(ticker, format!("{:#}", e)))?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_cache_events {
            log::info!("{}: {} raw bars from {}", ticker, bars.len(), self.signature());
        }

        PriceSeries::from_unordered(ticker, bars, start, end).map(Arc::new)
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, DataError> {
        self.fetch_quote(ticker)
            .await
            .map_err(|e| DataError::unavailable(ticker, format!("{:#}", e)))
    }

    fn signature(&self) -> &'static str {
        "Yahoo Finance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CHART_OK: &str = r#"{"chart":{"result":[{"meta":{"gmtoffset":-18000},"timestamp":[1704205800,1704292200,1704378600],"indicators":{"quote":[{"open":[187.15,184.22,182.15],"high":[188.44,185.88,183.09],"low":[183.89,183.43,180.88],"close":[185.64,184.25,181.91],"volume":[82488700,58414500,71983600]}]}}],"error":null}}"#;

    const CHART_WITH_NULLS: &str = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"timestamp":[1704153600,1704240000,1704326400],"indicators":{"quote":[{"open":[185.0,null,187.0],"high":[186.0,null,188.0],"low":[184.0,null,186.0],"close":[185.5,null,187.5],"volume":[1000000,null,1200000]}]}}],"error":null}}"#;

    const CHART_NOT_FOUND: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

    const QUOTE_OK: &str = r#"{"quoteResponse":{"result":[{"symbol":"AAPL","marketCap":3450000000000,"fiftyTwoWeekHigh":237.23,"fiftyTwoWeekLow":164.08}],"error":null}}"#;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn provider_for(server: &MockServer) -> YahooProvider {
        YahooProvider::with_endpoints(Endpoints {
            cookie_url: format!("{}/session", server.uri()),
            crumb_url: format!("{}/v1/test/getcrumb", server.uri()),
            chart_url: format!("{}/v8/finance/chart", server.uri()),
            quote_url: format!("{}/v7/finance/quote", server.uri()),
        })
        .unwrap()
    }

    /// Cookie endpoint answering 404 with a session cookie, like the real one.
    async fn mount_cookie(server: &MockServer, sessions: u64) {
        Mock::given(method("GET"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(404).insert_header("set-cookie", "A3=session; Path=/"))
            .expect(sessions)
            .mount(server)
            .await;
    }

    /// Crumb endpoint that only answers sessions carrying the cookie.
    async fn mount_crumb(server: &MockServer, crumb: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .and(header("cookie", "A3=session"))
            .respond_with(ResponseTemplate::new(200).set_body_string(crumb))
            .up_to_n_times(times)
            .expect(times)
            .mount(server)
            .await;
    }

    #[test]
    fn parse_chart_applies_exchange_offset() {
        let bars = parse_chart(CHART_OK).unwrap();
        assert_eq!(bars.len(), 3);
        // 1704205800 is 2024-01-02 14:30 UTC, 09:30 in New York
        assert_eq!(bars[0].date, day(2024, 1, 2));
        assert_eq!(bars[2].date, day(2024, 1, 4));
        assert_eq!(bars[1].close, 184.25);
        assert_eq!(bars[0].volume, 82_488_700);
    }

    #[test]
    fn parse_chart_skips_incomplete_bars() {
        let bars = parse_chart(CHART_WITH_NULLS).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, 187.5);
    }

    #[test]
    fn parse_chart_surfaces_provider_error() {
        let err = parse_chart(CHART_NOT_FOUND).unwrap_err();
        assert!(format!("{:#}", err).contains("Not Found"));
        assert!(parse_chart("not json").is_err());
    }

    #[test]
    fn parse_chart_without_timestamps_is_empty() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart(body).unwrap().is_empty());
    }

    #[test]
    fn parse_quote_reads_snapshot_fields() {
        let snapshot = parse_quote(QUOTE_OK, "AAPL").unwrap();
        assert_eq!(snapshot.market_cap, 3_450_000_000_000);
        assert_eq!(snapshot.week52_high, 237.23);
        assert_eq!(snapshot.week52_low, 164.08);
    }

    #[test]
    fn parse_quote_requires_every_field() {
        let body = r#"{"quoteResponse":{"result":[{"symbol":"AAPL","fiftyTwoWeekHigh":1.0,"fiftyTwoWeekLow":0.5}],"error":null}}"#;
        let err = parse_quote(body, "AAPL").unwrap_err();
        assert!(err.to_string().contains("marketCap"));

        let empty = r#"{"quoteResponse":{"result":[],"error":null}}"#;
        assert!(parse_quote(empty, "AAPL").is_err());
    }

    #[test]
    fn unix_conversion_is_utc_midnight() {
        assert_eq!(date_to_unix(day(1970, 1, 1)), 0);
        assert_eq!(date_to_unix(day(2024, 1, 2)), 1_704_153_600);
    }

    #[tokio::test]
    async fn fetch_returns_series_within_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1d"))
            .and(query_param("period1", "1704067200"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART_OK))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let series = provider
            .fetch("AAPL", day(2024, 1, 1), day(2024, 1, 3))
            .await
            .unwrap();

        // 2024-01-04 lies past the requested end
        assert_eq!(series.len(), 2);
        assert_eq!(series.ticker(), "AAPL");
        assert_eq!(series.last_date(), day(2024, 1, 3));
    }

    #[tokio::test]
    async fn unknown_ticker_is_data_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/UNKNOWN_XYZ"))
            .respond_with(ResponseTemplate::new(404).set_body_string(CHART_NOT_FOUND))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider
            .fetch("UNKNOWN_XYZ", day(2018, 1, 1), day(2024, 1, 1))
            .await
            .unwrap_err();

        match err {
            DataError::DataUnavailable { ticker, reason } => {
                assert_eq!(ticker, "UNKNOWN_XYZ");
                assert!(reason.contains("404"));
                assert!(reason.contains("No data found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn range_without_bars_is_empty_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CHART_OK))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider
            .fetch("AAPL", day(2030, 1, 1), day(2030, 2, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::EmptySeries { .. }));
    }

    #[tokio::test]
    async fn server_error_is_data_unavailable() {
        let server = MockServer::start().await;
        mount_cookie(&server, 1).await;
        mount_crumb(&server, "crumb-1", 1).await;
        Mock::given(method("GET"))
            .and(path("/v7/finance/quote"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.fetch_snapshot("AAPL").await.unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn fetch_snapshot_sends_session_crumb() {
        let server = MockServer::start().await;
        mount_cookie(&server, 1).await;
        mount_crumb(&server, "crumb-1", 1).await;
        Mock::given(method("GET"))
            .and(path("/v7/finance/quote"))
            .and(query_param("symbols", "AAPL"))
            .and(query_param("crumb", "crumb-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(QUOTE_OK))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let snapshot = provider.fetch_snapshot("AAPL").await.unwrap();
        assert_eq!(snapshot.market_cap, 3_450_000_000_000);

        // Crumb is cached across requests
        provider.fetch_snapshot("AAPL").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_crumb_is_refreshed_once() {
        let server = MockServer::start().await;
        mount_cookie(&server, 2).await;
        mount_crumb(&server, "stale-crumb", 1).await;
        mount_crumb(&server, "fresh-crumb", 1).await;
        Mock::given(method("GET"))
            .and(path("/v7/finance/quote"))
            .and(query_param("crumb", "stale-crumb"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"finance":{"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v7/finance/quote"))
            .and(query_param("crumb", "fresh-crumb"))
            .respond_with(ResponseTemplate::new(200).set_body_string(QUOTE_OK))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let snapshot = provider.fetch_snapshot("AAPL").await.unwrap();
        assert_eq!(snapshot.week52_high, 237.23);

        // The refreshed crumb is the one cached
        provider.fetch_snapshot("AAPL").await.unwrap();
    }

    #[tokio::test]
    async fn persistent_401_is_data_unavailable() {
        let server = MockServer::start().await;
        mount_cookie(&server, 2).await;
        mount_crumb(&server, "crumb-1", 1).await;
        mount_crumb(&server, "crumb-2", 1).await;
        Mock::given(method("GET"))
            .and(path("/v7/finance/quote"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.fetch_snapshot("AAPL").await.unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn missing_crumb_is_data_unavailable() {
        let server = MockServer::start().await;
        mount_cookie(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.fetch_snapshot("AAPL").await.unwrap_err();
        assert!(err.to_string().contains("crumb request failed"));
    }
}
