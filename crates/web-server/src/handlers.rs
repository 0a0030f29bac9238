use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use calculators::{catalog, CalculatorCategory, CalculatorConfig, CalculatorError};
use core_types::{AnalyzeRequest, AnalyzeResponse, ChatRequest, ChatResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Version reported by the analysis status endpoint.
pub const ANALYSIS_API_VERSION: &str = "4.0.0";

/// # POST /api/ai-analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let messages = state.analyzer.messages();
    let Json(request) = payload.map_err(|rejection| AppError::MalformedBody {
        message: messages.generic_error,
        detail: rejection.body_text(),
    })?;

    let response = state
        .analyzer
        .analyze(&request)
        .await
        .map_err(|source| AppError::Analyzer {
            source,
            message: messages.generic_error,
        })?;
    Ok(Json(response))
}

/// # GET /api/ai-analyze
/// Static status telling the UI whether model-backed analysis is available.
pub async fn analyze_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "AI Analysis API with Real-Time Prices",
        "hasApiKey": state.analyzer.has_llm(),
        "model": state.model,
        "features": [
            "Real-time prices from Yahoo Finance",
            format!("{} analysis", state.model),
            "Local fallback analysis with pivot levels",
        ],
        "version": ANALYSIS_API_VERSION,
    }))
}

/// # POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let messages = state.chat.messages();
    let Json(request) = payload.map_err(|rejection| AppError::MalformedBody {
        message: messages.generic_error,
        detail: rejection.body_text(),
    })?;

    let response = state.chat.reply(&request).await.map_err(|source| AppError::Analyzer {
        source,
        message: messages.generic_error,
    })?;
    Ok(Json(response))
}

/// # GET /api/chat
pub async fn chat_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Infinity Algo Chat API",
        "hasApiKey": state.chat.has_llm(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub implemented: Option<bool>,
    pub featured: Option<bool>,
}

/// # GET /api/calculators
/// The catalogue, optionally filtered by `?category=`, `?implemented=` and `?featured=`.
pub async fn list_calculators(
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<&'static CalculatorConfig>>, AppError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<CalculatorCategory>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let entries = catalog::all()
        .iter()
        .filter(|entry| category.is_none_or(|category| entry.category == category))
        .filter(|entry| query.implemented.is_none_or(|wanted| entry.is_implemented == wanted))
        .filter(|entry| query.featured.is_none_or(|wanted| entry.featured == wanted))
        .collect();
    Ok(Json(entries))
}

/// # GET /api/calculators/:slug
pub async fn get_calculator(
    Path(slug): Path<String>,
) -> Result<Json<&'static CalculatorConfig>, AppError> {
    catalog::by_slug(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No calculator with slug '{}'", slug)))
}

/// # POST /api/calculators/:slug
/// Runs one calculator on a JSON body of its inputs.
pub async fn run_calculator(
    Path(slug): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    if catalog::by_slug(&slug).is_none() {
        return Err(CalculatorError::NotFound(slug).into());
    }
    let Json(input) = payload.map_err(|rejection| CalculatorError::InvalidInput {
        slug: slug.clone(),
        message: rejection.body_text(),
    })?;

    tracing::debug!(%slug, "Running calculator");
    let output = calculators::evaluate(&slug, input)?;
    Ok(Json(output))
}
