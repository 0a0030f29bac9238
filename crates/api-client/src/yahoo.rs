use crate::QuoteProvider;
use crate::error::ApiError;
use crate::responses::{ChartResponse, ChartResult};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use configuration::settings::QuoteConfig;
use core_types::Quote;
use reqwest::Url;
use rust_decimal::Decimal;
use std::time::Duration;

/// Number of trailing closes used when the provider omits the day's high/low.
const RECENT_CLOSES: usize = 7;

/// A concrete `QuoteProvider` backed by the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooFinanceClient {
    client: reqwest::Client,
    base_url: Url,
    interval: String,
}

impl YahooFinanceClient {
    pub fn new(config: &QuoteConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| ApiError::InvalidUrl(config.base_url.clone()))?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            interval: config.interval.clone(),
        })
    }

    fn chart_url(&self, ticker: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceClient {
    async fn fetch_quote(&self, ticker: &str, range: &str) -> Result<Quote, ApiError> {
        let url = self.chart_url(ticker)?;
        tracing::debug!(%url, range, "Fetching quote");

        let response = self
            .client
            .get(url)
            .query(&[("interval", self.interval.as_str()), ("range", range)])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        // Yahoo answers unknown tickers with 404 and a JSON error body.
        let parsed = serde_json::from_str::<ChartResponse>(&text);
        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.chart.error)
                .map(|error| format!("{}: {}", error.code, error.description))
                .unwrap_or(text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = parsed.map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if let Some(error) = body.chart.error {
            return Err(ApiError::InvalidData(format!(
                "{}: {}",
                error.code, error.description
            )));
        }
        let result = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ApiError::InvalidData(format!("No chart data for {}", ticker)))?;

        quote_from_chart(ticker, result)
    }
}

/// Builds a quote from one chart result.
///
/// The live price comes from the metadata, falling back to the last valid close. A missing
/// day high/low falls back to the extremes of the last seven closes.
pub fn quote_from_chart(ticker: &str, result: ChartResult) -> Result<Quote, ApiError> {
    let meta = result.meta;
    let closes: Vec<Decimal> = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
        .map(|series| series.close.into_iter().flatten().collect())
        .unwrap_or_default();

    let positive = |value: Option<Decimal>| value.filter(|v| *v > Decimal::ZERO);

    let price = positive(meta.regular_market_price)
        .or_else(|| closes.last().copied())
        .ok_or_else(|| ApiError::InvalidData(format!("No price available for {}", ticker)))?;

    let previous_close = positive(meta.previous_close)
        .or_else(|| positive(meta.chart_previous_close))
        .or_else(|| closes.iter().rev().nth(1).copied())
        .unwrap_or(price);
    let change = price
        .checked_sub(previous_close)
        .ok_or_else(|| ApiError::InvalidData(format!("Price out of range for {}", ticker)))?;
    let change_percent = change
        .checked_div(previous_close)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);

    let recent = &closes[closes.len().saturating_sub(RECENT_CLOSES)..];
    let high = positive(meta.regular_market_day_high)
        .or_else(|| recent.iter().max().copied())
        .unwrap_or(price);
    let low = positive(meta.regular_market_day_low)
        .or_else(|| recent.iter().min().copied())
        .unwrap_or(price);

    Ok(Quote {
        ticker: ticker.to_string(),
        price,
        change,
        change_percent,
        high,
        low,
        previous_close,
        as_of: meta
            .regular_market_time
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> YahooFinanceClient {
        let config = QuoteConfig {
            base_url: server.uri(),
            ..QuoteConfig::default()
        };
        YahooFinanceClient::new(&config).unwrap()
    }

    fn chart(meta: serde_json::Value, closes: serde_json::Value) -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": meta,
                    "indicators": { "quote": [{ "close": closes }] }
                }],
                "error": null
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_quote_from_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/EURUSD=X"))
            .and(query_param("interval", "1d"))
            .and(query_param("range", "1mo"))
            .and(header("user-agent", QuoteConfig::default().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart(
                json!({
                    "symbol": "EURUSD=X",
                    "regularMarketPrice": 1.1,
                    "previousClose": 1.1,
                    "regularMarketDayHigh": 1.105,
                    "regularMarketDayLow": 1.095,
                    "regularMarketTime": 1_700_000_000
                }),
                json!([1.09, null, 1.1]),
            )))
            .mount(&server)
            .await;

        let quote = client_for(&server).fetch_quote("EURUSD=X", "1mo").await.unwrap();
        assert_eq!(quote.ticker, "EURUSD=X");
        assert_eq!(quote.price, dec!(1.1));
        assert_eq!(quote.change, Decimal::ZERO);
        assert_eq!(quote.high, dec!(1.105));
        assert_eq!(quote.low, dec!(1.095));
        assert!(quote.as_of.is_some());
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/NOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
                }
            })))
            .mount(&server)
            .await;

        let error = client_for(&server).fetch_quote("NOPE", "5d").await.unwrap_err();
        match error {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert!(message.starts_with("Not Found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fallbacks_to_closes() {
        let body: ChartResponse = serde_json::from_value(chart(
            json!({ "previousClose": 100 }),
            json!([90, 95, null, 120, 110, 105, 101, 99, 100, 102]),
        ))
        .unwrap();
        let result = body.chart.result.unwrap().remove(0);
        let quote = quote_from_chart("AAPL", result).unwrap();
        assert_eq!(quote.price, dec!(102));
        assert_eq!(quote.change, dec!(2));
        assert_eq!(quote.change_percent, dec!(2));
        // Only the last seven valid closes count: 90 and 95 fall outside the window.
        assert_eq!(quote.high, dec!(120));
        assert_eq!(quote.low, dec!(99));
    }

    #[test]
    fn test_no_price_at_all() {
        let body: ChartResponse =
            serde_json::from_value(chart(json!({}), json!([null, null]))).unwrap();
        let result = body.chart.result.unwrap().remove(0);
        assert!(matches!(
            quote_from_chart("X", result),
            Err(ApiError::InvalidData(_))
        ));
    }

    #[test]
    fn test_out_of_range_closes_are_invalid_data() {
        let body: ChartResponse = serde_json::from_value(chart(
            json!({}),
            json!(["-79000000000000000000000000000", "79000000000000000000000000000"]),
        ))
        .unwrap();
        let result = body.chart.result.unwrap().remove(0);
        assert!(matches!(
            quote_from_chart("X", result),
            Err(ApiError::InvalidData(_))
        ));
    }
}
