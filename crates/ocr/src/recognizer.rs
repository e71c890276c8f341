use std::collections::VecDeque;
use std::sync::Mutex;

use thiserror::Error;

use crate::config::OcrConfig;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available: build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept encoded (PNG) image bytes and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

impl OcrBackend for Box<dyn OcrBackend> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

// ── Mock backends (always available, used for tests) ──────────────────────────

/// Returns a pre-set string for every image.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Returns queued strings one per call, in order. Running dry is an engine error.
pub struct ScriptedRecognizer {
    queue: Mutex<VecDeque<String>>,
}

impl ScriptedRecognizer {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(texts.into_iter().map(Into::into).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }
}

impl OcrBackend for ScriptedRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|e| OcrError::Engine(e.to_string()))?;
        queue
            .pop_front()
            .ok_or_else(|| OcrError::Engine("script exhausted".into()))
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use crate::config::OcrConfig;
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
        page_segmentation_mode: u8,
    }

    impl TesseractRecognizer {
        pub fn new(config: &OcrConfig) -> Self {
            Self {
                data_path: config.data_path.clone(),
                lang: config.language.clone(),
                page_segmentation_mode: config.page_segmentation_mode,
            }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_variable(
                Variable::TesseditPagesegMode,
                &self.page_segmentation_mode.to_string(),
            )
            .map_err(|_| {
                OcrError::Engine(format!(
                    "rejected page segmentation mode {}",
                    self.page_segmentation_mode
                ))
            })?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

/// The engine-backed recognizer for this build.
#[cfg(feature = "tesseract")]
pub fn backend_from_config(config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    tracing::debug!(
        lang = %config.language,
        psm = config.page_segmentation_mode,
        "Using Tesseract backend"
    );
    Ok(Box::new(tesseract_backend::TesseractRecognizer::new(config)))
}

/// The engine-backed recognizer for this build.
#[cfg(not(feature = "tesseract"))]
pub fn backend_from_config(_config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    Err(OcrError::NotAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("one two\nthree");
        assert_eq!(r.recognize(b"fake image data").unwrap(), "one two\nthree");
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), "hello");
        assert_eq!(r.recognize(b"").unwrap(), "hello");
    }

    #[test]
    fn scripted_returns_in_order_then_fails() {
        let r = ScriptedRecognizer::new(["first", "second"]);
        assert_eq!(r.recognize(b"").unwrap(), "first");
        assert_eq!(r.remaining(), 1);
        assert_eq!(r.recognize(b"").unwrap(), "second");
        assert!(matches!(r.recognize(b""), Err(OcrError::Engine(_))));
    }

    #[test]
    fn boxed_backend_delegates() {
        let boxed: Box<dyn OcrBackend> = Box::new(MockRecognizer::new("boxed"));
        assert_eq!(boxed.recognize(b"").unwrap(), "boxed");
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn engine_unavailable_without_feature() {
        let err = backend_from_config(&OcrConfig::default()).err();
        assert!(matches!(err, Some(OcrError::NotAvailable)));
    }
}
