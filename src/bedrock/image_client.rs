use crate::{
    bedrock::invoke_json,
    error::{ModelError, Result},
    models::{CanvasImageResponse, GeneratedImage, ImageGenerationRequest, ImageGenerationResponse},
    providers::ImageModel,
};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use serde_json::{json, Value};

// Nova Canvas and Titan Image always return PNG.
const CANVAS_MIME_TYPE: &str = "image/png";

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    model_id: String,
}

impl ImageClient {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

fn is_canvas_model(model_id: &str) -> bool {
    model_id.starts_with("amazon.nova-canvas") || model_id.starts_with("amazon.titan-image")
}

#[async_trait]
impl ImageModel for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        let model_id = request.model_id.as_deref().unwrap_or(self.model_id.as_str());
        if !is_canvas_model(model_id) {
            return Err(ModelError::RequestError(format!(
                "Unsupported image model: {}",
                model_id
            )));
        }

        if request.output_format != CANVAS_MIME_TYPE {
            log::debug!(
                "{} ignores output format {}, images come back as {}",
                model_id,
                request.output_format,
                CANVAS_MIME_TYPE
            );
        }

        log::info!("Generating image with model: {}", model_id);
        let payload = build_payload(&request);
        let body = invoke_json(&self.client, model_id, &payload).await?;

        Ok(ImageGenerationResponse {
            images: parse_response(&body)?,
            model: model_id.to_string(),
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn build_payload(request: &ImageGenerationRequest) -> Value {
    let (width, height) = request.aspect_ratio.dimensions();
    json!({
        "taskType": "TEXT_IMAGE",
        "textToImageParams": {
            "text": request.prompt
        },
        "imageGenerationConfig": {
            "numberOfImages": request.image_count,
            "width": width,
            "height": height,
            "quality": "standard",
            "cfgScale": 8.0
        }
    })
}

fn parse_response(body: &[u8]) -> Result<Vec<GeneratedImage>> {
    let response: CanvasImageResponse =
        serde_json::from_slice(body).map_err(|e| ModelError::ResponseError(e.to_string()))?;

    if let Some(error) = response.error.filter(|e| !e.is_empty()) {
        return Err(ModelError::ResponseError(error));
    }

    Ok(response
        .images
        .into_iter()
        .map(|data| GeneratedImage {
            data,
            mime_type: CANVAS_MIME_TYPE.to_string(),
        })
        .collect())
}
