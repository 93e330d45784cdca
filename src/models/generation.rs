use crate::catalog::{AspectRatio, Style};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One user submission. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: Style,
    pub aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, style: Style, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: prompt.into(),
            style,
            aspect_ratio,
        }
    }

    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }
}

/// Decoded image bytes ready for display or export.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageHandle {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImageHandle {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn from_base64(
        data: &str,
        mime_type: impl Into<String>,
    ) -> Result<Self, base64::DecodeError> {
        let bytes = STANDARD.decode(data.trim())?;
        Ok(Self::new(bytes, mime_type))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<mime>;base64,<payload>`, embeddable in an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

// Image payloads are large; keep Debug output to the metadata.
impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What the view layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub image: Option<ImageHandle>,
    pub loading: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_prompt() {
        assert!(GenerationRequest::new("a cat", Style::None, AspectRatio::Square).has_prompt());
        assert!(!GenerationRequest::new("  \n\t", Style::Anime, AspectRatio::Square).has_prompt());
    }

    #[test]
    fn test_image_handle_from_base64() {
        let handle = ImageHandle::from_base64("/9j/4AAQ", "image/jpeg").unwrap();
        assert_eq!(handle.bytes(), &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]);
        assert_eq!(handle.data_uri(), "data:image/jpeg;base64,/9j/4AAQ");
        assert_eq!(handle.extension(), "jpg");
        assert!(ImageHandle::from_base64("not base64!", "image/jpeg").is_err());
    }

    #[test]
    fn test_debug_omits_payload() {
        let handle = ImageHandle::new(vec![1, 2, 3], "image/png");
        assert_eq!(
            format!("{:?}", handle),
            "ImageHandle { mime_type: \"image/png\", len: 3 }"
        );
    }
}
