use crate::{
    bedrock::BedrockClient,
    config::{Config, Provider},
    enhancer::PromptEnhancer,
    error::GenerationError,
    logger,
    models::{GenerationRequest, ImageHandle},
    providers::{GeminiClient, ImageModel, TextModel},
    requestor::ImageRequestor,
};
use std::sync::Arc;

/// Runs the two-stage pipeline: rewrite the prompt, then render it.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    enhancer: PromptEnhancer,
    requestor: ImageRequestor,
}

impl GenerationOrchestrator {
    pub fn new(text_model: Arc<dyn TextModel>, image_model: Arc<dyn ImageModel>) -> Self {
        Self {
            enhancer: PromptEnhancer::new(text_model),
            requestor: ImageRequestor::new(image_model),
        }
    }

    /// Builds the backends named by `config.provider`.
    pub async fn from_config(config: &Config) -> Self {
        let orchestrator = match config.provider {
            Provider::Gemini => {
                let (text, image) = GeminiClient::new(config.gemini.clone()).into_parts();
                Self::new(Arc::new(text), Arc::new(image))
            }
            Provider::Bedrock => {
                let (text, image) = BedrockClient::new(config.bedrock.clone())
                    .await
                    .into_parts();
                Self::new(Arc::new(text), Arc::new(image))
            }
        };

        log::info!("Generation pipeline ready ({})", config.provider);
        orchestrator
    }

    pub async fn generate_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<ImageHandle, GenerationError> {
        let _timer = logger::timer("image generation");

        let enhanced = self.enhancer.enhance(&request.prompt, request.style).await;
        self.requestor
            .request_image(&enhanced, request.aspect_ratio)
            .await
    }
}
