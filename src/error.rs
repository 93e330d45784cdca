use thiserror::Error;

/// Failures raised by a model backend (Gemini REST, Bedrock, or a test fake).
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("AWS error: {0}")]
    AwsError(String),
    #[error("AWS service error: {0}")]
    AwsServiceError(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

pub const NO_IMAGE_MESSAGE: &str = "No image was generated. Please try a different prompt.";
pub const SAFETY_MESSAGE: &str =
    "The prompt triggered safety filters. Please modify your description.";

/// Substrings (matched case-insensitively) that mark a provider error as a safety block.
pub const SAFETY_INDICATORS: &[&str] = &["safety", "content filters"];

/// A failed generation attempt. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImageProduced,
    #[error("{}", SAFETY_MESSAGE)]
    SafetyRejected,
    #[error("{0}")]
    TransportOrModel(String),
}

impl GenerationError {
    /// Classify a backend failure into the message surfaced to the user.
    pub fn from_model_error(err: &ModelError) -> Self {
        let message = err.to_string();
        if is_safety_block(&message) {
            GenerationError::SafetyRejected
        } else {
            GenerationError::TransportOrModel(message)
        }
    }
}

pub fn is_safety_block(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SAFETY_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}
