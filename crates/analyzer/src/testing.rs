//! Stub providers shared by the unit tests.

use api_client::{ApiError, CompletionRequest, LlmProvider, QuoteProvider};
use async_trait::async_trait;
use core_types::Quote;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn gold_quote() -> Quote {
    Quote {
        ticker: "GC=F".to_string(),
        price: dec!(2350),
        change: dec!(23.27),
        change_percent: dec!(1.00),
        high: dec!(2360),
        low: dec!(2330),
        previous_close: dec!(2326.73),
        as_of: None,
    }
}

/// Answers with fixed quotes per ticker; unknown tickers fail. Records every request.
#[derive(Clone, Default)]
pub struct StubQuotes {
    quotes: HashMap<String, Quote>,
    requested: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubQuotes {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with(quote: Quote) -> Self {
        Self::default().and(quote)
    }

    pub fn and(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.ticker.clone(), quote);
        self
    }

    pub fn requested(&self) -> Vec<(String, String)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for StubQuotes {
    async fn fetch_quote(&self, ticker: &str, range: &str) -> Result<Quote, ApiError> {
        self.requested
            .lock()
            .unwrap()
            .push((ticker.to_string(), range.to_string()));
        self.quotes.get(ticker).cloned().ok_or_else(|| ApiError::Status {
            status: 404,
            message: format!("Not Found: {ticker}"),
        })
    }
}

pub struct StubLlm {
    reply: Result<String, u16>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubLlm {
    pub fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(500),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(|status| ApiError::Status {
            status,
            message: "upstream unavailable".to_string(),
        })
    }
}
