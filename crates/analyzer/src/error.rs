use api_client::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The request is missing a required field. Carries the localised message shown to the user.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ApiError),

    /// The model answered, but not with a usable JSON object.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}
