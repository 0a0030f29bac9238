use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("No calculator is registered under '{0}'")]
    NotFound(String),

    #[error("Invalid input for calculator '{slug}': {message}")]
    InvalidInput { slug: String, message: String },

    #[error("The inputs for calculator '{0}' do not produce a result")]
    NoResult(String),

    #[error("Failed to serialize the result: {0}")]
    Serialization(String),
}
