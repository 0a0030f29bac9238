use rust_decimal::Decimal;
use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to map the providers' camelCase JSON onto snake_case.

// --- Yahoo Finance chart API ---

/// Envelope of `GET /v8/finance/chart/{ticker}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Error object Yahoo embeds for unknown tickers (e.g., `{"code":"Not Found", ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub indicators: Option<ChartIndicators>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<Decimal>,
    #[serde(default)]
    pub previous_close: Option<Decimal>,
    #[serde(default)]
    pub chart_previous_close: Option<Decimal>,
    #[serde(default)]
    pub regular_market_day_high: Option<Decimal>,
    #[serde(default)]
    pub regular_market_day_low: Option<Decimal>,
    /// Unix seconds of the last trade.
    #[serde(default)]
    pub regular_market_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

/// One OHLC series. Yahoo pads missing sessions with `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub close: Vec<Option<Decimal>>,
}

// --- OpenAI-compatible chat completions ---

/// The subset of `POST /chat/completions` we read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Represents an error response from an OpenAI-compatible API.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmErrorResponse {
    pub error: LlmErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
