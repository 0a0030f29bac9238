use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The asset class a symbol belongs to. Drives ticker normalisation and price precision.
///
/// Unknown market names deserialize to `Stocks`, which passes the symbol through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Market {
    Forex,
    Crypto,
    Commodities,
    Indices,
    #[default]
    Stocks,
}

impl Market {
    /// Number of decimals used when rendering prices for this market.
    pub fn price_decimals(&self) -> u32 {
        match self {
            Market::Forex => 5,
            _ => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Forex => "forex",
            Market::Crypto => "crypto",
            Market::Commodities => "commodities",
            Market::Indices => "indices",
            Market::Stocks => "stocks",
        }
    }
}

impl From<String> for Market {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "forex" | "fx" => Market::Forex,
            "crypto" => Market::Crypto,
            "commodities" | "commodity" | "metals" => Market::Commodities,
            "indices" | "index" => Market::Indices,
            _ => Market::Stocks,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional market sentiment returned by the analysis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Bias {
    /// Maps an arbitrary model-provided string onto one of the three literals.
    /// Anything unrecognised collapses to `Neutral`.
    pub fn from_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bullish" => Bias::Bullish,
            "bearish" => Bias::Bearish,
            _ => Bias::Neutral,
        }
    }
}

/// The direction of the swing used for Fibonacci levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    #[default]
    Uptrend,
    Downtrend,
}

/// The side of a trade for stop and P&L calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    #[default]
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Language for user-visible messages and model answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Ar),
            "en" | "english" => Ok(Locale::En),
            other => Err(CoreError::UnknownVariant {
                kind: "locale",
                value: other.to_string(),
            }),
        }
    }
}
