use crate::error::AnalyzerError;
use crate::fallback::fallback_analysis;
use crate::messages::Messages;
use crate::parsing::shape_completion;
use crate::prompts::{analysis_system_prompt, analysis_user_prompt, price_block};
use api_client::{CompletionRequest, LlmProvider, PromptMessage, QuoteProvider, to_provider_ticker};
use configuration::{AnalysisSettings, Config};
use core_types::{AnalyzeRequest, AnalyzeResponse, Locale, Quote};
use std::sync::Arc;

/// Produces a structured market analysis for one symbol.
///
/// The pipeline is linear: validate, fetch a live quote, ask the model, and fall back to a
/// locally computed analysis whenever the model is unavailable or unusable. Provider failures
/// are logged and never surface to the caller.
pub struct MarketAnalyzer {
    quotes: Arc<dyn QuoteProvider>,
    llm: Option<Arc<dyn LlmProvider>>,
    settings: AnalysisSettings,
    temperature: f32,
    max_tokens: u32,
    quote_range: String,
    locale: Locale,
}

impl MarketAnalyzer {
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        llm: Option<Arc<dyn LlmProvider>>,
        config: &Config,
    ) -> Self {
        Self {
            quotes,
            llm,
            settings: config.analysis.clone(),
            temperature: config.providers.llm.analysis_temperature,
            max_tokens: config.providers.llm.analysis_max_tokens,
            quote_range: config.providers.quotes.analysis_range.clone(),
            locale: config.locale,
        }
    }

    /// Whether a model is configured. Without one every answer is the local fallback.
    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.llm.as_deref().map(|llm| llm.model())
    }

    pub fn messages(&self) -> &'static Messages {
        Messages::for_locale(self.locale)
    }

    /// Analyses `request`.
    ///
    /// # Errors
    /// Only `InvalidRequest`, when the symbol or the question is blank.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, AnalyzerError> {
        let messages = self.messages();
        if request.symbol.trim().is_empty() || request.user_prompt.trim().is_empty() {
            return Err(AnalyzerError::InvalidRequest(
                messages.missing_symbol_or_prompt.to_string(),
            ));
        }

        let ticker = to_provider_ticker(&request.symbol, request.market);
        tracing::info!(
            symbol = %request.symbol.trim(),
            market = %request.market,
            timeframe = %request.timeframe,
            %ticker,
            has_llm = self.has_llm(),
            "Analysis request"
        );

        let quote = match self.quotes.fetch_quote(&ticker, &self.quote_range).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "Quote unavailable, continuing without a live price");
                None
            }
        };

        if let Some(llm) = &self.llm {
            match self.ask_model(llm.as_ref(), request, quote.as_ref()).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(model = llm.model(), error = %e, "Model analysis failed, serving the local fallback");
                }
            }
        }

        Ok(fallback_analysis(request, quote.as_ref(), &self.settings, messages))
    }

    async fn ask_model(
        &self,
        llm: &dyn LlmProvider,
        request: &AnalyzeRequest,
        quote: Option<&Quote>,
    ) -> Result<AnalyzeResponse, AnalyzerError> {
        let decimals = request.market.price_decimals();
        let price_info = price_block(quote, decimals, self.locale);
        let completion = CompletionRequest {
            messages: vec![
                PromptMessage::system(analysis_system_prompt(&price_info, self.locale)),
                PromptMessage::user(analysis_user_prompt(request, &price_info, self.locale)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_mode: true,
        };

        let content = llm.complete(&completion).await?;
        shape_completion(&content, quote, decimals, &self.settings, self.messages())
    }
}
