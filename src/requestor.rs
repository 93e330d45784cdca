use crate::{
    catalog::AspectRatio,
    error::GenerationError,
    models::{ImageGenerationRequest, ImageHandle},
    providers::ImageModel,
};
use std::sync::Arc;

/// Asks the image model for exactly one JPEG and decodes it.
///
/// Every failure is fatal for the attempt; there is no retry here.
#[derive(Clone)]
pub struct ImageRequestor {
    model: Arc<dyn ImageModel>,
}

impl ImageRequestor {
    pub fn new(model: Arc<dyn ImageModel>) -> Self {
        Self { model }
    }

    pub async fn request_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageHandle, GenerationError> {
        let request = ImageGenerationRequest::single(prompt, aspect_ratio);

        let response = self.model.generate(request).await.map_err(|e| {
            log::error!("Image generation failed on {}: {}", self.model.model_id(), e);
            GenerationError::from_model_error(&e)
        })?;

        let image = response.images.into_iter().next().ok_or_else(|| {
            log::warn!("{} returned no images", response.model);
            GenerationError::NoImageProduced
        })?;

        ImageHandle::from_base64(&image.data, image.mime_type).map_err(|e| {
            log::error!("Could not decode image payload: {}", e);
            GenerationError::TransportOrModel(format!("Invalid image payload: {}", e))
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{ModelError, Result};
    use crate::models::{GeneratedImage, ImageGenerationResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    pub(crate) const JPEG_BASE64: &str = "/9j/4AAQ";

    /// Image model returning a canned response and recording what it was sent.
    pub(crate) struct FakeImageModel {
        reply: Result<Vec<GeneratedImage>>,
        pub(crate) requests: Mutex<Vec<ImageGenerationRequest>>,
    }

    impl FakeImageModel {
        pub(crate) fn returning_jpeg() -> Self {
            Self::with(Ok(vec![GeneratedImage {
                data: JPEG_BASE64.to_string(),
                mime_type: "image/jpeg".to_string(),
            }]))
        }

        pub(crate) fn failing(error: ModelError) -> Self {
            Self::with(Err(error))
        }

        pub(crate) fn with(reply: Result<Vec<GeneratedImage>>) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageModel for FakeImageModel {
        async fn generate(
            &self,
            request: ImageGenerationRequest,
        ) -> Result<ImageGenerationResponse> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone().map(|images| ImageGenerationResponse {
                images,
                model: "fake-image".to_string(),
            })
        }

        fn model_id(&self) -> &str {
            "fake-image"
        }
    }

    #[tokio::test]
    async fn test_requests_one_jpeg_at_ratio() {
        let model = Arc::new(FakeImageModel::returning_jpeg());
        let requestor = ImageRequestor::new(model.clone());

        let handle = requestor
            .request_image("a lighthouse", AspectRatio::Landscape4x3)
            .await
            .unwrap();
        assert_eq!(handle.mime_type(), "image/jpeg");
        assert_eq!(handle.data_uri(), format!("data:image/jpeg;base64,{}", JPEG_BASE64));

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "a lighthouse");
        assert_eq!(requests[0].image_count, 1);
        assert_eq!(requests[0].output_format, "image/jpeg");
        assert_eq!(requests[0].aspect_ratio, AspectRatio::Landscape4x3);
    }

    #[tokio::test]
    async fn test_zero_images() {
        let requestor = ImageRequestor::new(Arc::new(FakeImageModel::with(Ok(vec![]))));
        let err = requestor
            .request_image("a lighthouse", AspectRatio::Square)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::NoImageProduced);
        assert_eq!(
            err.to_string(),
            "No image was generated. Please try a different prompt."
        );
    }

    #[tokio::test]
    async fn test_safety_errors_are_rewritten() {
        let requestor = ImageRequestor::new(Arc::new(FakeImageModel::failing(
            ModelError::ResponseError("Blocked: Safety violation".into()),
        )));
        let err = requestor
            .request_image("something", AspectRatio::Square)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The prompt triggered safety filters. Please modify your description."
        );
    }

    #[tokio::test]
    async fn test_other_errors_pass_through() {
        let requestor = ImageRequestor::new(Arc::new(FakeImageModel::failing(
            ModelError::ApiError {
                status: 429,
                message: "Resource has been exhausted".into(),
            },
        )));
        let err = requestor
            .request_image("something", AspectRatio::Square)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::TransportOrModel(
                "API error (429): Resource has been exhausted".into()
            )
        );
    }

    #[tokio::test]
    async fn test_undecodable_payload() {
        let requestor = ImageRequestor::new(Arc::new(FakeImageModel::with(Ok(vec![
            GeneratedImage {
                data: "%%%".into(),
                mime_type: "image/jpeg".into(),
            },
        ]))));
        let err = requestor
            .request_image("something", AspectRatio::Square)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::TransportOrModel(m) if m.starts_with("Invalid image payload")));
    }
}
