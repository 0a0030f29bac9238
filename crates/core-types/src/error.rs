use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A string did not name any variant of an enum (e.g., an unsupported locale).
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
