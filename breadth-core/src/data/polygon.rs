//! Polygon.io data provider.
//!
//! Two endpoints are used:
//! - grouped daily aggregates (`/v2/aggs/grouped/...`) — every symbol's
//!   OHLCV bar for one trading day, adjusted;
//! - reference tickers (`/v3/reference/tickers`) — the active-ticker list,
//!   walked via cursor pagination (`next_url`).
//!
//! Transient failures retry with exponential backoff; 429 responses honor
//! `retry-after`. A pagination failure partway through the ticker walk
//! returns the pages already collected rather than failing the run.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use super::provider::{BarProvider, DataError, ReferenceProvider};
use crate::domain::{Bar, TickerRef};

const GROUPED_URL: &str = "https://api.polygon.io/v2/aggs/grouped/locale/us/market/stocks";
const TICKERS_URL: &str =
    "https://api.polygon.io/v3/reference/tickers?market=stocks&active=true&order=asc";

/// Grouped daily aggregates response.
#[derive(Debug, Deserialize)]
struct GroupedResponse {
    results: Option<Vec<GroupedResult>>,
}

/// One symbol's bar in the grouped response. Polygon uses single-letter
/// field names on this endpoint.
#[derive(Debug, Deserialize)]
struct GroupedResult {
    #[serde(rename = "T")]
    ticker: String,
    #[serde(rename = "v")]
    volume: f64,
    #[serde(rename = "o")]
    open: f64,
    #[serde(rename = "h")]
    high: f64,
    #[serde(rename = "l")]
    low: f64,
    #[serde(rename = "c")]
    close: f64,
}

/// Reference tickers response page.
#[derive(Debug, Deserialize)]
struct TickersResponse {
    results: Option<Vec<TickerResult>>,
    next_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TickerResult {
    ticker: String,
    #[serde(rename = "type")]
    asset_type: Option<String>,
    primary_exchange: Option<String>,
}

/// Polygon.io client implementing both provider traits.
pub struct PolygonProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    max_retries: u32,
    base_delay: Duration,
}

impl PolygonProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn grouped_url(&self, day: NaiveDate) -> String {
        format!(
            "{GROUPED_URL}/{}?adjusted=true&apiKey={}",
            day.format("%Y-%m-%d"),
            self.api_key
        )
    }

    fn parse_grouped(day: NaiveDate, resp: GroupedResponse) -> Vec<Bar> {
        resp.results
            .unwrap_or_default()
            .into_iter()
            .map(|r| Bar {
                symbol: r.ticker,
                date: day,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
            })
            // A malformed record drops that symbol-day only; the rest of
            // the day's cross-section survives.
            .filter(Bar::is_sane)
            .collect()
    }

    fn parse_tickers(resp: &mut TickersResponse) -> Vec<TickerRef> {
        resp.results
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|r| TickerRef {
                symbol: r.ticker,
                asset_type: r.asset_type.unwrap_or_default(),
                primary_exchange: r.primary_exchange,
            })
            .collect()
    }

    /// GET a URL with retry and backoff, deserializing the JSON body.
    fn get_with_retry<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(DataError::AuthenticationFailed(format!(
                            "Polygon rejected the API key (HTTP {status})"
                        )));
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status}")));
                        continue;
                    }

                    return resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!("failed to parse response: {e}"))
                    });
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl BarProvider for PolygonProvider {
    fn name(&self) -> &str {
        "polygon"
    }

    fn grouped_daily(&self, day: NaiveDate) -> Result<Vec<Bar>, DataError> {
        let resp: GroupedResponse = self.get_with_retry(&self.grouped_url(day))?;
        Ok(Self::parse_grouped(day, resp))
    }
}

impl ReferenceProvider for PolygonProvider {
    fn tickers(&self) -> Result<Vec<TickerRef>, DataError> {
        let first_url = format!("{TICKERS_URL}&apiKey={}", self.api_key);
        let mut page: TickersResponse = self.get_with_retry(&first_url)?;
        let mut all = Self::parse_tickers(&mut page);

        while let Some(next) = page.next_url.take() {
            let url = format!("{next}&apiKey={}", self.api_key);
            match self.get_with_retry::<TickersResponse>(&url) {
                Ok(mut next_page) => {
                    all.extend(Self::parse_tickers(&mut next_page));
                    page = next_page;
                }
                // Keep what we have; a partial reference list still lets
                // the run proceed.
                Err(_) => break,
            }
        }

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_response() {
        let json = r#"{
            "queryCount": 2,
            "resultsCount": 2,
            "adjusted": true,
            "results": [
                {"T": "AAPL", "v": 70790813.0, "vw": 189.3, "o": 190.0, "c": 189.7, "h": 191.1, "l": 188.5, "t": 1718000000000, "n": 100},
                {"T": "MSFT", "v": 16862353.0, "vw": 424.1, "o": 423.0, "c": 425.3, "h": 426.0, "l": 422.2, "t": 1718000000000, "n": 100}
            ]
        }"#;
        let resp: GroupedResponse = serde_json::from_str(json).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let bars = PolygonProvider::parse_grouped(day, resp);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].symbol, "AAPL");
        assert_eq!(bars[0].date, day);
        assert_eq!(bars[0].close, 189.7);
        assert_eq!(bars[1].volume, 16862353.0);
    }

    #[test]
    fn malformed_record_drops_only_that_symbol_day() {
        // MSFT's high is below its low; AAPL must survive
        let json = r#"{
            "queryCount": 2,
            "resultsCount": 2,
            "adjusted": true,
            "results": [
                {"T": "AAPL", "v": 70790813.0, "o": 190.0, "c": 189.7, "h": 191.1, "l": 188.5, "t": 1718000000000, "n": 100},
                {"T": "MSFT", "v": 16862353.0, "o": 423.0, "c": 425.3, "h": 400.0, "l": 422.2, "t": 1718000000000, "n": 100}
            ]
        }"#;
        let resp: GroupedResponse = serde_json::from_str(json).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let bars = PolygonProvider::parse_grouped(day, resp);

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].symbol, "AAPL");
    }

    #[test]
    fn nonpositive_close_is_dropped() {
        let json = r#"{
            "queryCount": 1,
            "resultsCount": 1,
            "adjusted": true,
            "results": [
                {"T": "HALT", "v": 0.0, "o": 0.0, "c": 0.0, "h": 0.0, "l": 0.0, "t": 1718000000000, "n": 0}
            ]
        }"#;
        let resp: GroupedResponse = serde_json::from_str(json).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(PolygonProvider::parse_grouped(day, resp).is_empty());
    }

    #[test]
    fn grouped_day_without_results_is_empty() {
        let json = r#"{"queryCount": 0, "resultsCount": 0, "adjusted": true}"#;
        let resp: GroupedResponse = serde_json::from_str(json).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert!(PolygonProvider::parse_grouped(day, resp).is_empty());
    }

    #[test]
    fn parses_ticker_page_and_next_url() {
        let json = r#"{
            "results": [
                {"ticker": "A", "name": "Agilent", "type": "CS", "primary_exchange": "XNYS", "active": true},
                {"ticker": "SPY", "name": "SPDR S&P 500", "type": "ETF", "primary_exchange": "ARCX", "active": true},
                {"ticker": "NOTYPE", "name": "Mystery", "active": true}
            ],
            "next_url": "https://api.polygon.io/v3/reference/tickers?cursor=abc"
        }"#;
        let mut resp: TickersResponse = serde_json::from_str(json).unwrap();
        assert!(resp.next_url.is_some());

        let tickers = PolygonProvider::parse_tickers(&mut resp);
        assert_eq!(tickers.len(), 3);
        assert!(tickers[0].is_common_stock());
        assert!(!tickers[1].is_common_stock());
        // missing type never matches common stock
        assert!(!tickers[2].is_common_stock());
    }
}
