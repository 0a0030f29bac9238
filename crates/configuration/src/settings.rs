use core_types::Locale;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty `config.toml` (or none at all) yields a
/// runnable service that answers from the local fallback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: Providers,
    pub analysis: AnalysisSettings,
    pub chat: ChatSettings,
    /// Language of user-visible messages and model answers.
    pub locale: Locale,
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks the cross-field rules the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.llm.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "providers.llm.base_url must not be empty".to_string(),
            ));
        }
        if self.providers.quotes.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "providers.quotes.base_url must not be empty".to_string(),
            ));
        }
        if self.analysis.neutral_band_pct < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "analysis.neutral_band_pct must not be negative".to_string(),
            ));
        }
        if self.analysis.max_key_levels == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.max_key_levels must be at least 1".to_string(),
            ));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// External collaborators consumed by the analysis and chat features.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Providers {
    pub llm: LlmConfig,
    pub quotes: QuoteConfig,
}

/// An OpenAI-compatible chat-completion provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer credential. The model branch only runs when this is present.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub analysis_temperature: f32,
    pub analysis_max_tokens: u32,
    pub chat_temperature: f32,
    pub chat_max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            analysis_temperature: 0.2,
            analysis_max_tokens: 2500,
            chat_temperature: 0.7,
            chat_max_tokens: 2000,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// The credential, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

/// The public market-quote endpoint (Yahoo Finance chart API).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Candle interval requested from the chart endpoint (e.g., "1d").
    pub interval: String,
    /// History range fetched for the analysis endpoint.
    pub analysis_range: String,
    /// History range fetched for the chat endpoint.
    pub chat_range: String,
    pub timeout_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            interval: "1d".to_string(),
            analysis_range: "1mo".to_string(),
            chat_range: "5d".to_string(),
            timeout_secs: 20,
        }
    }
}

/// Shaping rules for analysis responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Model-provided key levels beyond this count are dropped.
    pub max_key_levels: usize,
    /// Model-provided scenarios beyond this count are dropped.
    pub max_scenarios: usize,
    /// Absolute daily change (in percent) below which a quote alone does not set a bias.
    pub neutral_band_pct: Decimal,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_key_levels: 6,
            max_scenarios: 4,
            neutral_band_pct: dec!(0.5),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Maximum number of symbols quoted for a single chat message.
    pub max_symbols: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self { max_symbols: 3 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "infinity-algo.log".to_string(),
        }
    }
}
