use crate::catalog::AspectRatio;
use serde::{Deserialize, Serialize};

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model_id: Option<String>,
    pub prompt: String,
    pub image_count: u32,
    pub output_format: String,
    pub aspect_ratio: AspectRatio,
}

impl ImageGenerationRequest {
    /// One JPEG image for `prompt` at the given ratio.
    pub fn single(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            model_id: None,
            prompt: prompt.into(),
            image_count: 1,
            output_format: JPEG_MIME_TYPE.to_string(),
            aspect_ratio,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    pub images: Vec<GeneratedImage>,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub data: String, // Base64 encoded
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CanvasImageResponse {
    #[serde(default)]
    pub images: Vec<String>,
    pub error: Option<String>,
}
