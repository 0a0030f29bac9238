use crate::enums::{Bias, ChatRole, Market};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Optional price levels a user can attach to an analysis request.
///
/// Values arrive as free text from the UI, so they are kept as strings and
/// parsed leniently by whoever needs them. API clients may send plain numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    #[serde(default, deserialize_with = "text_or_number")]
    pub high: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub low: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub close: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(value) => value.to_string(),
        Raw::Unsigned(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}

/// Body of `POST /api/ai-analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub market: Market,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub levels: Option<PriceLevels>,
    #[serde(default)]
    pub user_prompt: String,
}

/// A single support/resistance style level in an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLevel {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: String,
    pub note: String,
}

/// A conditional trade plan in an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub condition: String,
    pub action: String,
    pub target: String,
}

/// Result of `POST /api/ai-analyze`, either parsed from the model or synthesized locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub bias: Bias,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<String>,
    pub key_levels: Vec<KeyLevel>,
    pub scenarios: Vec<Scenario>,
    pub risk_note: String,
    pub raw_text: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub market: Option<Market>,
}

/// Result of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub prices: BTreeMap<String, PriceSnapshot>,
}

/// One entry of a client-side conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }
}

/// A live quote as returned by the quote provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// The provider ticker the quote was fetched for (e.g., "GC=F").
    pub ticker: String,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    /// Day high, or the highest of the recent closes when the provider omits it.
    pub high: Decimal,
    /// Day low, or the lowest of the recent closes when the provider omits it.
    pub low: Decimal,
    pub previous_close: Decimal,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

/// The compact price view embedded in chat responses. Serialized as plain JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,
}

impl From<&Quote> for PriceSnapshot {
    fn from(quote: &Quote) -> Self {
        Self {
            price: quote.price,
            change: quote.change,
            change_percent: quote.change_percent,
        }
    }
}
