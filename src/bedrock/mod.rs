pub mod image_client;
pub mod text_client;

use crate::{
    config::BedrockConfig,
    error::{ModelError, Result},
};
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::{error::ProvideErrorMetadata, primitives::Blob, Client};
use serde_json::Value;

pub use image_client::ImageClient;
pub use text_client::TextClient;

#[derive(Clone)]
pub struct BedrockClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl BedrockClient {
    pub async fn new(bedrock_config: BedrockConfig) -> Self {
        let region = bedrock_config
            .region
            .clone()
            .unwrap_or_else(|| "us-east-1".to_string());

        let aws_config = if let (Some(access_key), Some(secret_key)) =
            (&bedrock_config.access_key, &bedrock_config.secret_key)
        {
            aws_config::defaults(BehaviorVersion::latest())
                .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "rasm-bedrock",
                ))
                .region(aws_sdk_bedrockruntime::config::Region::new(region))
                .load()
                .await
        } else {
            log::debug!("No explicit AWS credentials, using the default provider chain");
            aws_config::defaults(BehaviorVersion::latest())
                .region(aws_sdk_bedrockruntime::config::Region::new(region))
                .load()
                .await
        };

        let client = Client::new(&aws_config);

        Self {
            text_client: TextClient::new(client.clone(), bedrock_config.text_model),
            image_client: ImageClient::new(client, bedrock_config.image_model),
        }
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn into_parts(self) -> (TextClient, ImageClient) {
        (self.text_client, self.image_client)
    }
}

/// Sends one JSON `InvokeModel` call and returns the raw response body.
async fn invoke_json(client: &Client, model_id: &str, payload: &Value) -> Result<Vec<u8>> {
    let request_json = serde_json::to_string(payload)
        .map_err(|e| ModelError::SerializationError(e.to_string()))?;
    log::debug!("Bedrock request payload for {}: {}", model_id, request_json);

    let response = client
        .invoke_model()
        .model_id(model_id)
        .content_type("application/json")
        .accept("application/json")
        .body(Blob::new(request_json.into_bytes()))
        .send()
        .await
        .map_err(|e| {
            log::error!("Bedrock InvokeModel error details: {:?}", e);

            if let Some(service_error) = e.as_service_error() {
                ModelError::AwsServiceError(format!(
                    "Bedrock service error: {} - {}",
                    service_error.code().unwrap_or("unknown"),
                    service_error.message().unwrap_or("no message")
                ))
            } else {
                ModelError::AwsError(format!("AWS SDK error: {}", e))
            }
        })?;

    Ok(response.body.into_inner())
}
