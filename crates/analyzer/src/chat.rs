use crate::error::AnalyzerError;
use crate::messages::Messages;
use crate::prompts::chat_system_prompt;
use crate::render::price_with_change;
use api_client::{
    CompletionRequest, LlmProvider, PromptMessage, QuoteProvider, detect_ticker, extract_symbols,
    to_provider_ticker,
};
use configuration::Config;
use core_types::{ChatRequest, ChatResponse, Locale, PriceSnapshot, Quote};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Answers free-form trading questions, grounded on live prices of the symbols mentioned.
pub struct ChatAssistant {
    quotes: Arc<dyn QuoteProvider>,
    llm: Option<Arc<dyn LlmProvider>>,
    max_symbols: usize,
    quote_range: String,
    temperature: f32,
    max_tokens: u32,
    locale: Locale,
}

impl ChatAssistant {
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        llm: Option<Arc<dyn LlmProvider>>,
        config: &Config,
    ) -> Self {
        Self {
            quotes,
            llm,
            max_symbols: config.chat.max_symbols,
            quote_range: config.providers.quotes.chat_range.clone(),
            temperature: config.providers.llm.chat_temperature,
            max_tokens: config.providers.llm.chat_max_tokens,
            locale: config.locale,
        }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub fn messages(&self) -> &'static Messages {
        Messages::for_locale(self.locale)
    }

    /// Replies to one chat message.
    ///
    /// # Errors
    /// Only `InvalidRequest`, when the message is blank.
    pub async fn reply(&self, request: &ChatRequest) -> Result<ChatResponse, AnalyzerError> {
        let messages = self.messages();
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AnalyzerError::InvalidRequest(
                messages.empty_chat_message.to_string(),
            ));
        }

        let quotes = self.fetch_quotes(request).await;
        tracing::info!(
            symbols = quotes.len(),
            has_llm = self.has_llm(),
            "Chat request"
        );

        let response = match &self.llm {
            Some(llm) => match self.ask_model(llm.as_ref(), message, &quotes).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(model = llm.model(), error = %e, "Chat model failed, serving the canned reply");
                    canned_reply(&quotes, messages.chat_provider_unreachable, messages)
                }
            },
            None => canned_reply(&quotes, messages.chat_needs_key, messages),
        };

        let prices = quotes
            .iter()
            .map(|(symbol, quote)| (symbol.clone(), PriceSnapshot::from(quote)))
            .collect::<BTreeMap<_, _>>();

        Ok(ChatResponse { response, prices })
    }

    /// Quotes for the symbols in play, in mention order, skipping any that fail.
    ///
    /// An explicit `symbol` on the request comes first and uses its `market` when given;
    /// symbols found in the text follow, with their market guessed from the name.
    async fn fetch_quotes(&self, request: &ChatRequest) -> Vec<(String, Quote)> {
        let mut wanted: Vec<(String, String)> = Vec::new();
        if let Some(symbol) = request.symbol.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let ticker = match request.market {
                Some(market) => to_provider_ticker(symbol, market),
                None => detect_ticker(symbol),
            };
            wanted.push((symbol.to_uppercase(), ticker));
        }
        for symbol in extract_symbols(&request.message) {
            if !wanted.iter().any(|(known, _)| *known == symbol) {
                let ticker = detect_ticker(&symbol);
                wanted.push((symbol, ticker));
            }
        }
        wanted.truncate(self.max_symbols);

        let mut quotes = Vec::with_capacity(wanted.len());
        for (symbol, ticker) in wanted {
            match self.quotes.fetch_quote(&ticker, &self.quote_range).await {
                Ok(quote) => quotes.push((symbol, quote)),
                Err(e) => tracing::warn!(%symbol, %ticker, error = %e, "Skipping symbol without a quote"),
            }
        }
        quotes
    }

    async fn ask_model(
        &self,
        llm: &dyn LlmProvider,
        message: &str,
        quotes: &[(String, Quote)],
    ) -> Result<String, AnalyzerError> {
        let completion = CompletionRequest {
            messages: vec![
                PromptMessage::system(chat_system_prompt(quotes, self.locale)),
                PromptMessage::user(message),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_mode: false,
        };
        Ok(llm.complete(&completion).await?)
    }
}

/// The reply used when no model answer is available: the fetched prices and a spelling tip.
fn canned_reply(quotes: &[(String, Quote)], notice: &str, messages: &Messages) -> String {
    let prices = if quotes.is_empty() {
        messages.chat_no_prices.to_string()
    } else {
        let lines: Vec<String> = quotes
            .iter()
            .map(|(symbol, quote)| format!("• {}: {}", symbol, price_with_change(quote)))
            .collect();
        format!("{}\n{}", messages.chat_current_prices, lines.join("\n"))
    };
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        messages.chat_greeting, notice, prices, messages.chat_symbol_tip
    )
}
