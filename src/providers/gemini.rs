use crate::{
    config::GeminiConfig,
    error::{ModelError, Result},
    models::{
        GeneratedImage, ImageGenerationRequest, ImageGenerationResponse, TextCompletion,
        TextCompletionRequest,
    },
    providers::traits::{ImageModel, TextModel},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Clone)]
struct GeminiTransport {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiTransport {
    async fn post(&self, model: &str, method: &str, payload: &Value) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ModelError::ConfigError("Gemini API key is not configured (set GEMINI_API_KEY)".into())
        })?;

        let url = format!(
            "{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            model,
            method
        );
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| ModelError::RequestError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            log::error!("Gemini returned {} for {}: {}", status, model, body);
            return Err(ModelError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(body)
    }
}

/// Entry point for the Gemini backend; hands out the text and image clients.
#[derive(Clone)]
pub struct GeminiClient {
    text_client: GeminiTextClient,
    image_client: GeminiImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let transport = GeminiTransport {
            http: Client::new(),
            api_key: config.api_key,
            base_url: config.base_url,
        };

        if transport.api_key.is_none() {
            log::warn!("No Gemini API key configured; every request will fail");
        }

        Self {
            text_client: GeminiTextClient {
                transport: transport.clone(),
                model_id: config.text_model,
            },
            image_client: GeminiImageClient {
                transport,
                model_id: config.image_model,
            },
        }
    }

    pub fn text(&self) -> &GeminiTextClient {
        &self.text_client
    }

    pub fn image(&self) -> &GeminiImageClient {
        &self.image_client
    }

    pub fn into_parts(self) -> (GeminiTextClient, GeminiImageClient) {
        (self.text_client, self.image_client)
    }
}

#[derive(Clone)]
pub struct GeminiTextClient {
    transport: GeminiTransport,
    model_id: String,
}

#[async_trait]
impl TextModel for GeminiTextClient {
    async fn complete(&self, request: TextCompletionRequest) -> Result<TextCompletion> {
        let model_id = request.model_id.as_deref().unwrap_or(self.model_id.as_str());
        log::info!("Invoking text model: {}", model_id);

        let payload = text_payload(&request);
        let body = self
            .transport
            .post(model_id, "generateContent", &payload)
            .await?;

        Ok(TextCompletion {
            text: parse_text_response(&body)?,
            model: model_id.to_string(),
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[derive(Clone)]
pub struct GeminiImageClient {
    transport: GeminiTransport,
    model_id: String,
}

#[async_trait]
impl ImageModel for GeminiImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        let model_id = request.model_id.as_deref().unwrap_or(self.model_id.as_str());
        log::info!("Generating image with model: {}", model_id);

        let payload = image_payload(&request);
        let body = self.transport.post(model_id, "predict", &payload).await?;

        Ok(ImageGenerationResponse {
            images: parse_image_response(&body, &request.output_format)?,
            model: model_id.to_string(),
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn text_payload(request: &TextCompletionRequest) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": request.system_instruction }]
        },
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": request.message }]
            }
        ]
    })
}

fn image_payload(request: &ImageGenerationRequest) -> Value {
    json!({
        "instances": [{ "prompt": request.prompt }],
        "parameters": {
            "sampleCount": request.image_count,
            "aspectRatio": request.aspect_ratio.as_str(),
            "outputOptions": { "mimeType": request.output_format }
        }
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
    rai_filtered_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Joined text of the first candidate; `None` when the model produced nothing.
fn parse_text_response(body: &str) -> Result<Option<String>> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ModelError::ResponseError(e.to_string()))?;

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        log::warn!("Text model blocked the prompt: {}", reason);
    }

    let text: String = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    Ok(if text.is_empty() { None } else { Some(text) })
}

fn parse_image_response(body: &str, default_mime: &str) -> Result<Vec<GeneratedImage>> {
    let response: PredictResponse =
        serde_json::from_str(body).map_err(|e| ModelError::ResponseError(e.to_string()))?;

    let mut images = Vec::new();
    for prediction in response.predictions {
        match prediction.bytes_base64_encoded {
            Some(data) => images.push(GeneratedImage {
                data,
                mime_type: prediction
                    .mime_type
                    .unwrap_or_else(|| default_mime.to_string()),
            }),
            // Imagen drops the payload and reports a reason when its filters trip.
            None => log::warn!(
                "Imagen filtered a prediction: {}",
                prediction.rai_filtered_reason.as_deref().unwrap_or("no reason given")
            ),
        }
    }

    Ok(images)
}

fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty error response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
