use crate::{
    bedrock::invoke_json,
    error::{ModelError, Result},
    models::{ClaudeResponse, TextCompletion, TextCompletionRequest, TitanTextResponse},
    providers::TextModel,
};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use serde_json::{json, Value};

const MAX_TOKENS: i32 = 512;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextFamily {
    Anthropic,
    Titan,
}

fn text_family(model_id: &str) -> Option<TextFamily> {
    match model_id {
        id if id.starts_with("anthropic.claude") => Some(TextFamily::Anthropic),
        // cross-region inference profiles, e.g. us.anthropic.claude-3-5-haiku
        id if id.contains(".anthropic.claude") => Some(TextFamily::Anthropic),
        id if id.starts_with("arn:aws:bedrock") => Some(TextFamily::Anthropic),
        id if id.starts_with("amazon.titan-text") => Some(TextFamily::Titan),
        _ => None,
    }
}

#[derive(Clone)]
pub struct TextClient {
    client: Client,
    model_id: String,
}

impl TextClient {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl TextModel for TextClient {
    async fn complete(&self, request: TextCompletionRequest) -> Result<TextCompletion> {
        let model_id = request.model_id.as_deref().unwrap_or(self.model_id.as_str());
        let family = text_family(model_id).ok_or_else(|| {
            ModelError::RequestError(format!("Unsupported model ID: {}", model_id))
        })?;

        log::info!("Invoking model: {}", model_id);
        let payload = build_payload(family, &request);
        let body = invoke_json(&self.client, model_id, &payload).await?;

        Ok(TextCompletion {
            text: parse_response(family, &body)?,
            model: model_id.to_string(),
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

fn build_payload(family: TextFamily, request: &TextCompletionRequest) -> Value {
    match family {
        TextFamily::Anthropic => json!({
            "anthropic_version": "bedrock-2023-05-31",
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "system": request.system_instruction,
            "messages": [
                {
                    "role": "user",
                    "content": request.message
                }
            ]
        }),
        // Titan has no system slot; the instruction leads the prompt.
        TextFamily::Titan => json!({
            "inputText": format!(
                "{}\n\nUser: {}\nBot:",
                request.system_instruction, request.message
            ),
            "textGenerationConfig": {
                "maxTokenCount": MAX_TOKENS,
                "temperature": TEMPERATURE,
                "topP": 0.9
            }
        }),
    }
}

fn parse_response(family: TextFamily, body: &[u8]) -> Result<Option<String>> {
    let text = match family {
        TextFamily::Anthropic => {
            let response: ClaudeResponse = serde_json::from_slice(body)
                .map_err(|e| ModelError::ResponseError(e.to_string()))?;
            log::debug!("Claude stop reason: {:?}", response.stop_reason);
            response
                .content
                .into_iter()
                .filter(|block| block.kind == "text")
                .filter_map(|block| block.text)
                .collect::<String>()
        }
        TextFamily::Titan => {
            let response: TitanTextResponse = serde_json::from_slice(body)
                .map_err(|e| ModelError::ResponseError(e.to_string()))?;
            response
                .results
                .into_iter()
                .next()
                .map(|result| {
                    log::debug!("Titan completion reason: {:?}", result.completion_reason);
                    result.output_text
                })
                .unwrap_or_default()
        }
    };

    Ok(if text.is_empty() { None } else { Some(text) })
}
