//! Prompt-enhanced text-to-image generation.
//!
//! A raw description (Arabic or English) is rewritten by a text model into a detailed
//! English prompt, then rendered by an image model. [`GenerationSession`] drives the
//! idle/loading/success/error lifecycle for a front-end.

pub mod bedrock;
pub mod catalog;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod requestor;
pub mod session;

pub use bedrock::BedrockClient;
pub use catalog::{AspectRatio, Style, ASPECT_RATIOS, STYLE_OPTIONS};
pub use config::{BedrockConfig, Config, GeminiConfig, Provider};
pub use enhancer::PromptEnhancer;
pub use error::{GenerationError, ModelError, Result};
pub use models::*;
pub use orchestrator::GenerationOrchestrator;
pub use providers::{GeminiClient, ImageModel, TextModel};
pub use requestor::ImageRequestor;
pub use session::{GenerationSession, GenerationState, SessionSnapshot, SubmitRejected};
