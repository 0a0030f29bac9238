//! # Infinity Algo Analyzer
//!
//! The AI side of the platform: structured market analysis for one symbol and a free-form
//! trading chat, both anchored on live quotes.
//!
//! ## Architectural Principles
//!
//! - **Providers behind traits:** Quotes and completions arrive through
//!   `api_client::QuoteProvider` / `api_client::LlmProvider`, injected at construction.
//! - **Always an answer:** A missing credential, an unreachable provider or an unusable model
//!   reply all degrade to a deterministic local answer. The only error a caller sees is an
//!   invalid request, carrying a message in the configured locale.
//! - **Real numbers only:** Prices shown to the user (and to the model) are rendered from the
//!   quote, 5 decimals for forex and 2 otherwise.
//!
//! ## Public API
//!
//! - `MarketAnalyzer`: `POST /api/ai-analyze` semantics.
//! - `ChatAssistant`: `POST /api/chat` semantics.
//! - `Messages`: The localised user-visible strings.

pub mod analysis;
pub mod chat;
pub mod error;
pub mod fallback;
pub mod messages;
pub mod parsing;
pub mod prompts;
pub mod render;

#[cfg(test)]
mod testing;

// --- Public API ---
pub use analysis::MarketAnalyzer;
pub use chat::ChatAssistant;
pub use error::AnalyzerError;
pub use fallback::{fallback_analysis, keyword_sentiment};
pub use messages::Messages;
