use analyzer::{ChatAssistant, MarketAnalyzer};
use api_client::{LlmProvider, OpenAiClient, QuoteProvider, YahooFinanceClient};
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::Config;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub analyzer: MarketAnalyzer,
    pub chat: ChatAssistant,
    /// Model name reported by the status endpoints.
    pub model: String,
}

impl AppState {
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        llm: Option<Arc<dyn LlmProvider>>,
        config: &Config,
    ) -> Self {
        Self {
            analyzer: MarketAnalyzer::new(quotes.clone(), llm.clone(), config),
            chat: ChatAssistant::new(quotes, llm, config),
            model: config.providers.llm.model.clone(),
        }
    }

    /// Wires the real Yahoo Finance and OpenAI clients. The model client is only built when
    /// a credential is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let quotes: Arc<dyn QuoteProvider> =
            Arc::new(YahooFinanceClient::new(&config.providers.quotes)?);
        let llm: Option<Arc<dyn LlmProvider>> = if config.providers.llm.is_configured() {
            Some(Arc::new(OpenAiClient::new(&config.providers.llm)?))
        } else {
            tracing::warn!("No LLM API key configured, analysis and chat will use the local fallback");
            None
        };
        Ok(Self::new(quotes, llm, config))
    }
}

/// Builds the application router with CORS, request tracing and the body limit applied.
pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/ai-analyze",
            get(handlers::analyze_status).post(handlers::analyze),
        )
        .route("/api/chat", get(handlers::chat_status).post(handlers::chat))
        .route("/api/calculators", get(handlers::list_calculators))
        .route(
            "/api/calculators/:slug",
            get(handlers::get_calculator).post(handlers::run_calculator),
        )
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let state = Arc::new(AppState::from_config(&config)?);
    tracing::info!(
        model = %state.model,
        has_llm = state.analyzer.has_llm(),
        locale = ?config.locale,
        "Services ready"
    );

    let app = build_router(state, config.server.body_limit_bytes);

    tracing::info!("Web server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::{ApiError, CompletionRequest};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use core_types::Quote;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct NoQuotes;

    #[async_trait]
    impl QuoteProvider for NoQuotes {
        async fn fetch_quote(&self, ticker: &str, _range: &str) -> Result<Quote, ApiError> {
            Err(ApiError::InvalidData(format!("No chart data for {}", ticker)))
        }
    }

    struct DownLlm;

    #[async_trait]
    impl LlmProvider for DownLlm {
        fn model(&self) -> &str {
            "gpt-4o"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ApiError> {
            Err(ApiError::Status {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    fn app(llm: Option<Arc<dyn LlmProvider>>) -> Router {
        let config = Config::default();
        let state = AppState::new(Arc::new(NoQuotes), llm, &config);
        build_router(Arc::new(state), config.server.body_limit_bytes)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(None)
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_analyze_requires_symbol() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/ai-analyze",
            Some(json!({ "symbol": "", "userPrompt": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "يرجى إدخال الرمز والسؤال");
    }

    #[tokio::test]
    async fn test_analyze_without_key_uses_fallback() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/ai-analyze",
            Some(json!({
                "market": "forex",
                "symbol": "EUR/USD",
                "timeframe": "H4",
                "userPrompt": "Where is support?"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(["bullish", "bearish", "neutral"].contains(&body["bias"].as_str().unwrap()));
        assert!(!body["keyLevels"].as_array().unwrap().is_empty());
        assert!(body["riskNote"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_with_failing_model_still_answers() {
        let (status, body) = send(
            app(Some(Arc::new(DownLlm))),
            "POST",
            "/api/ai-analyze",
            Some(json!({ "symbol": "BTC", "market": "crypto", "userPrompt": "buy?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bias"], "bullish");
    }

    #[tokio::test]
    async fn test_analyze_malformed_body() {
        let app = app(None);
        let request = Request::builder()
            .method("POST")
            .uri("/api/ai-analyze")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_status_endpoints() {
        let (_, analysis) = send(app(None), "GET", "/api/ai-analyze", None).await;
        assert_eq!(analysis["status"], "ok");
        assert_eq!(analysis["hasApiKey"], false);
        assert_eq!(analysis["model"], "gpt-4o");

        let (_, chat) = send(app(Some(Arc::new(DownLlm))), "GET", "/api/chat", None).await;
        assert_eq!(chat["hasApiKey"], true);
    }

    #[tokio::test]
    async fn test_chat_validation_and_reply() {
        let (status, body) = send(app(None), "POST", "/api/chat", Some(json!({ "message": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "اكتب سؤالك");

        let (status, body) = send(
            app(None),
            "POST",
            "/api/chat",
            Some(json!({ "message": "What about XAUUSD?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().contains("Infinity Algo AI"));
        assert_eq!(body["prices"], json!({}));
    }

    #[tokio::test]
    async fn test_calculator_catalogue() {
        let (status, body) = send(app(None), "GET", "/api/calculators", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), calculators::catalog::all().len());

        let (_, featured) = send(app(None), "GET", "/api/calculators?featured=true", None).await;
        assert!(featured.as_array().unwrap().iter().all(|entry| entry["featured"] == true));

        let (_, risk) = send(
            app(None),
            "GET",
            "/api/calculators?category=risk-management",
            None,
        )
        .await;
        assert!(risk
            .as_array()
            .unwrap()
            .iter()
            .all(|entry| entry["category"] == "Risk Management"));

        let (status, _) = send(app(None), "GET", "/api/calculators?category=astrology", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, entry) = send(app(None), "GET", "/api/calculators/position-size", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["slug"], "position-size");

        let (status, _) = send(app(None), "GET", "/api/calculators/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_calculator_status_mapping() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/calculators/risk-reward",
            Some(json!({ "entryPrice": 100, "stopLoss": 95, "takeProfit": 110 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_object());

        let (status, _) = send(app(None), "POST", "/api/calculators/nope", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            app(None),
            "POST",
            "/api/calculators/risk-reward",
            Some(json!({ "entryPrice": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_with_oversized_levels_serves_reference_level() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/ai-analyze",
            Some(json!({
                "symbol": "AAPL",
                "userPrompt": "x",
                "levels": { "high": "79228162514264337593543950335", "low": "1" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyLevels"].as_array().unwrap().len(), 1);
        assert_eq!(body["keyLevels"][0]["price"], "N/A");
    }

    #[tokio::test]
    async fn test_analyze_accepts_numeric_levels() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/ai-analyze",
            Some(json!({
                "market": "commodities",
                "symbol": "XAUUSD",
                "userPrompt": "levels?",
                "levels": { "high": 110, "low": 90, "close": 100 }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyLevels"].as_array().unwrap().len(), 7);
        assert_eq!(body["keyLevels"][0]["price"], "120.00");
    }

    #[tokio::test]
    async fn test_large_calculator_inputs_never_drop_the_connection() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/calculators/correlation",
            Some(json!({ "seriesA": [1e8, -1e8, 5], "seriesB": [1e8, -1e8, 7] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strength"], "strong");

        let (status, body) = send(
            app(None),
            "POST",
            "/api/calculators/break-even",
            Some(json!({ "positions": [{ "price": "5e28", "size": "10" }], "currentPrice": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_position_size_with_zero_risk() {
        let (status, body) = send(
            app(None),
            "POST",
            "/api/calculators/position-size",
            Some(json!({
                "accountSize": 10000,
                "riskPercent": 0,
                "stopLossPips": 50,
                "pipValue": 10
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["positionSize"], "0");
        assert_eq!(body["roundedLots"], "0.01");
    }
}
