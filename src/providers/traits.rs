use crate::{
    error::Result,
    models::{ImageGenerationRequest, ImageGenerationResponse, TextCompletion, TextCompletionRequest},
};
use async_trait::async_trait;

/// A text-generation model taking one system instruction and one user message.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, request: TextCompletionRequest) -> Result<TextCompletion>;

    fn model_id(&self) -> &str;
}

/// An image-generation model.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse>;

    fn model_id(&self) -> &str;
}
