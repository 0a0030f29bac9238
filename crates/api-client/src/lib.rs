//! # Infinity Algo API Clients
//!
//! HTTP clients for the two upstream services the analysis endpoints depend on: a live
//! quote provider (Yahoo Finance chart API) and an OpenAI-compatible chat-completion API.
//!
//! ## Architectural Principles
//!
//! - **Traits at the seam:** Callers depend on [`QuoteProvider`] and [`LlmProvider`], never
//!   on the concrete clients, so the analyzer and the web server can be tested with stubs.
//! - **Errors, not fallbacks:** Every failure (transport, non-2xx status, malformed body) is
//!   returned as an [`ApiError`]. Deciding what to show instead is the caller's job.
//!
//! ## Public API
//!
//! - `QuoteProvider` / `YahooFinanceClient`: Live quotes by provider ticker.
//! - `LlmProvider` / `OpenAiClient`: Chat completions, optionally in JSON mode.
//! - `symbols`: User symbol to provider ticker mapping and symbol extraction from text.

use async_trait::async_trait;
use core_types::Quote;
use serde::Serialize;

pub mod error;
pub mod openai;
pub mod responses;
pub mod symbols;
pub mod yahoo;

// --- Public API ---
pub use error::ApiError;
pub use openai::OpenAiClient;
pub use symbols::{detect_ticker, extract_symbols, to_provider_ticker};
pub use yahoo::YahooFinanceClient;

/// The abstract interface for a live market-quote source.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the latest quote for a provider ticker (e.g., "GC=F"), using `range` of
    /// history (e.g., "1mo") for the close-based fallbacks.
    async fn fetch_quote(&self, ticker: &str, range: &str) -> Result<Quote, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

/// One message of a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider to return a single JSON object.
    pub json_mode: bool,
}

/// The abstract interface for a chat-completion model.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// The model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Returns the text content of the first completion choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ApiError>;
}
