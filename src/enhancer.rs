use crate::{catalog::Style, models::TextCompletionRequest, providers::TextModel};
use std::sync::Arc;

pub const MAX_ENHANCED_WORDS: usize = 70;

/// Rewrites a raw prompt (any language) into a detailed English image prompt.
///
/// Enhancement never fails the pipeline: model errors are logged and replaced by
/// [`fallback_prompt`].
#[derive(Clone)]
pub struct PromptEnhancer {
    model: Arc<dyn TextModel>,
}

impl PromptEnhancer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn enhance(&self, prompt: &str, style: Style) -> String {
        let request = TextCompletionRequest {
            model_id: None,
            system_instruction: system_instruction(style),
            message: prompt.to_string(),
        };

        match self.model.complete(request).await {
            Ok(completion) => {
                let enhanced = completion
                    .text
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty());
                log::info!(
                    "Original: {} -> Enhanced: {}",
                    prompt,
                    enhanced.unwrap_or("<empty>")
                );
                enhanced.map_or_else(|| prompt.to_string(), str::to_string)
            }
            Err(e) => {
                log::warn!(
                    "Prompt enhancement failed on {}: {}",
                    self.model.model_id(),
                    e
                );
                fallback_prompt(prompt, style)
            }
        }
    }
}

pub fn system_instruction(style: Style) -> String {
    format!(
        "You are an expert AI image prompt specialist.\n\
         Your task is to translate the user's input to English (if in Arabic or other languages) \
         and refine it into a high-quality image generation prompt.\n\
         \n\
         Rules:\n\
         1. If the input is in Arabic, translate it accurately to English first.\n\
         2. Add descriptive details about lighting, texture, and composition that match the requested style: \"{}\".\n\
         3. Keep the prompt concise (under {} words) but vivid.\n\
         4. Return ONLY the enhanced prompt text. Do not add quotation marks or labels.",
        style, MAX_ENHANCED_WORDS
    )
}

/// Local composition used when the text model is unavailable.
pub fn fallback_prompt(prompt: &str, style: Style) -> String {
    match style {
        Style::None => prompt.to_string(),
        style => format!("{}, in {} style, high quality, 4k detail", prompt, style),
    }
}
