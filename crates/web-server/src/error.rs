use analyzer::AnalyzerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calculators::CalculatorError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A validation failure whose message is shown to the user as is.
    #[error("{0}")]
    BadRequest(String),
    /// The body could not be read as JSON. `message` is the localised text for the user.
    #[error("Malformed request body: {detail}")]
    MalformedBody { message: &'static str, detail: String },
    #[error("Analyzer error: {source}")]
    Analyzer {
        source: AnalyzerError,
        message: &'static str,
    },
    #[error("Calculator error: {0}")]
    Calculator(#[from] CalculatorError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::MalformedBody { message, detail } => {
                tracing::error!(error = %detail, "Malformed request body.");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Analyzer {
                source: AnalyzerError::InvalidRequest(message),
                ..
            } => (StatusCode::BAD_REQUEST, message),
            AppError::Analyzer { source, message } => {
                tracing::error!(error = ?source, "Analyzer error.");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Calculator(calc_err) => match calc_err {
                CalculatorError::NotFound(_) => (StatusCode::NOT_FOUND, calc_err.to_string()),
                CalculatorError::InvalidInput { .. } | CalculatorError::NoResult(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, calc_err.to_string())
                }
                CalculatorError::Serialization(_) => {
                    tracing::error!(error = ?calc_err, "Calculator error.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal calculation error occurred".to_string(),
                    )
                }
            },
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
