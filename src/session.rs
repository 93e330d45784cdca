use crate::{
    catalog::{AspectRatio, Style},
    models::{GenerationRequest, GenerationResult, ImageHandle},
    orchestrator::GenerationOrchestrator,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::{sync::watch, task::JoinHandle};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Success(ImageHandle),
    Error(String),
}

/// Everything a view needs to render the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: GenerationState,
    pub current_prompt: Option<String>,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self.state, GenerationState::Loading)
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        match &self.state {
            GenerationState::Success(image) => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            GenerationState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> GenerationResult {
        GenerationResult {
            image: self.image().cloned(),
            loading: self.is_loading(),
            error: self.error().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("A generation is already in progress")]
    AlreadyLoading,
}

/// Lifecycle of one generator control: idle, loading, then success or error.
///
/// Only one generation runs at a time; submissions made while loading are ignored.
pub struct GenerationSession {
    orchestrator: Arc<GenerationOrchestrator>,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl GenerationSession {
    pub fn new(orchestrator: GenerationOrchestrator) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            orchestrator: Arc::new(orchestrator),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn submit(
        &self,
        prompt: impl Into<String>,
        style: Style,
        aspect_ratio: AspectRatio,
    ) -> Result<JoinHandle<()>, SubmitRejected> {
        self.submit_request(GenerationRequest::new(prompt, style, aspect_ratio))
    }

    /// Starts a generation in a background task. Must be called within a tokio runtime.
    pub fn submit_request(
        &self,
        request: GenerationRequest,
    ) -> Result<JoinHandle<()>, SubmitRejected> {
        if !request.has_prompt() {
            log::debug!("Ignoring submission with an empty prompt");
            return Err(SubmitRejected::EmptyPrompt);
        }

        let mut accepted = false;
        self.state.send_if_modified(|snapshot| {
            if snapshot.is_loading() {
                return false;
            }
            *snapshot = SessionSnapshot {
                state: GenerationState::Loading,
                current_prompt: Some(request.prompt.clone()),
            };
            accepted = true;
            true
        });

        if !accepted {
            log::debug!("Ignoring submission while a generation is in progress");
            return Err(SubmitRejected::AlreadyLoading);
        }

        let submission_id = Uuid::new_v4();
        log::info!(
            "Submission {} accepted (style: {}, ratio: {})",
            submission_id,
            request.style,
            request.aspect_ratio
        );

        let orchestrator = Arc::clone(&self.orchestrator);
        let state = Arc::clone(&self.state);
        Ok(tokio::spawn(async move {
            let next = match orchestrator.generate_image(&request).await {
                Ok(image) => {
                    log::info!("Submission {} succeeded ({} bytes)", submission_id, image.len());
                    GenerationState::Success(image)
                }
                Err(e) => {
                    log::warn!("Submission {} failed: {}", submission_id, e);
                    GenerationState::Error(e.to_string())
                }
            };
            state.send_modify(|snapshot| snapshot.state = next);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancer::tests::FakeTextModel;
    use crate::error::{ModelError, Result};
    use crate::models::{GeneratedImage, ImageGenerationRequest, ImageGenerationResponse};
    use crate::providers::ImageModel;
    use crate::requestor::tests::{FakeImageModel, JPEG_BASE64};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    /// Holds every generation until the test releases it.
    struct GatedImageModel {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ImageModel for GatedImageModel {
        async fn generate(&self, _: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
            self.gate.notified().await;
            Ok(ImageGenerationResponse {
                images: vec![GeneratedImage {
                    data: JPEG_BASE64.to_string(),
                    mime_type: "image/jpeg".to_string(),
                }],
                model: "gated".to_string(),
            })
        }

        fn model_id(&self) -> &str {
            "gated"
        }
    }

    fn new_session(text: FakeTextModel, image: Arc<dyn ImageModel>) -> GenerationSession {
        GenerationSession::new(GenerationOrchestrator::new(Arc::new(text), image))
    }

    #[tokio::test]
    async fn test_scenario_success() {
        let image = Arc::new(FakeImageModel::returning_jpeg());
        let session = new_session(
            FakeTextModel::replying("a vivid red apple on a wooden table, soft light"),
            image.clone(),
        );
        assert_eq!(session.snapshot().state, GenerationState::Idle);

        session
            .submit("a red apple", Style::None, AspectRatio::Square)
            .unwrap()
            .await
            .unwrap();

        let snapshot = session.snapshot();
        let handle = snapshot.image().expect("image after success");
        assert_eq!(handle.data_uri(), format!("data:image/jpeg;base64,{}", JPEG_BASE64));
        assert_eq!(snapshot.current_prompt.as_deref(), Some("a red apple"));
        assert_eq!(
            snapshot.result(),
            GenerationResult {
                image: Some(handle.clone()),
                loading: false,
                error: None,
            }
        );
        assert_eq!(
            image.requests.lock().unwrap()[0].prompt,
            "a vivid red apple on a wooden table, soft light"
        );
    }

    #[tokio::test]
    async fn test_scenario_enhancer_failure_still_generates() {
        let image = Arc::new(FakeImageModel::returning_jpeg());
        let session = new_session(FakeTextModel::failing("network down"), image.clone());

        session
            .submit("a red apple", Style::None, AspectRatio::Square)
            .unwrap()
            .await
            .unwrap();

        assert!(session.snapshot().image().is_some());
        assert_eq!(image.requests.lock().unwrap()[0].prompt, "a red apple");
    }

    #[tokio::test]
    async fn test_scenario_safety_error() {
        let session = new_session(
            FakeTextModel::replying("a red apple"),
            Arc::new(FakeImageModel::failing(ModelError::RequestError(
                "Blocked: Safety violation".into(),
            ))),
        );

        session
            .submit("a red apple", Style::None, AspectRatio::Square)
            .unwrap()
            .await
            .unwrap();

        let snapshot = session.snapshot();
        assert_eq!(
            snapshot.error(),
            Some("The prompt triggered safety filters. Please modify your description.")
        );
        assert!(snapshot.image().is_none());
        assert!(!snapshot.result().loading);
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_ignored() {
        let gate = Arc::new(Notify::new());
        let session = new_session(
            FakeTextModel::replying("a cat"),
            Arc::new(GatedImageModel { gate: gate.clone() }),
        );

        let first = session
            .submit("a cat", Style::Anime, AspectRatio::Portrait9x16)
            .unwrap();
        assert!(session.snapshot().is_loading());

        let second = session.submit("a dog", Style::None, AspectRatio::Square);
        assert_eq!(second.unwrap_err(), SubmitRejected::AlreadyLoading);

        let snapshot = session.snapshot();
        assert!(snapshot.is_loading());
        assert_eq!(snapshot.current_prompt.as_deref(), Some("a cat"));
        assert_eq!(snapshot.result(), GenerationResult { image: None, loading: true, error: None });

        gate.notify_one();
        first.await.unwrap();
        assert!(session.snapshot().image().is_some());
    }

    #[tokio::test]
    async fn test_empty_prompt_is_ignored() {
        let session = new_session(
            FakeTextModel::replying("a cat"),
            Arc::new(FakeImageModel::returning_jpeg()),
        );

        let rejected = session.submit("   \t", Style::None, AspectRatio::Square);
        assert_eq!(rejected.unwrap_err(), SubmitRejected::EmptyPrompt);
        assert_eq!(session.snapshot(), SessionSnapshot::default());

        session
            .submit("a cat", Style::None, AspectRatio::Square)
            .unwrap()
            .await
            .unwrap();
        let before = session.snapshot();

        assert!(session.submit("", Style::None, AspectRatio::Square).is_err());
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn test_resubmit_after_error_clears_error() {
        let gate = Arc::new(Notify::new());
        let failing = new_session(
            FakeTextModel::replying("x"),
            Arc::new(FakeImageModel::with(Ok(vec![]))),
        );
        failing
            .submit("x", Style::None, AspectRatio::Square)
            .unwrap()
            .await
            .unwrap();
        assert_eq!(
            failing.snapshot().error(),
            Some("No image was generated. Please try a different prompt.")
        );

        // Same state machine, new backend: rebuild around the gated model.
        let session = GenerationSession {
            orchestrator: Arc::new(GenerationOrchestrator::new(
                Arc::new(FakeTextModel::replying("y")),
                Arc::new(GatedImageModel { gate: gate.clone() }),
            )),
            state: Arc::clone(&failing.state),
        };

        let task = session.submit("y", Style::None, AspectRatio::Square).unwrap();
        let snapshot = session.snapshot();
        assert!(snapshot.is_loading());
        assert_eq!(snapshot.error(), None);
        assert_eq!(snapshot.current_prompt.as_deref(), Some("y"));

        gate.notify_one();
        task.await.unwrap();
        assert!(session.snapshot().image().is_some());
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let gate = Arc::new(Notify::new());
        let session = new_session(
            FakeTextModel::replying("a cat"),
            Arc::new(GatedImageModel { gate: gate.clone() }),
        );
        let mut rx = session.subscribe();

        let task = session.submit("a cat", Style::None, AspectRatio::Square).unwrap();
        assert!(rx.borrow_and_update().is_loading());

        gate.notify_one();
        rx.changed().await.unwrap();
        assert!(rx.borrow().image().is_some());
        task.await.unwrap();
    }
}
