use image::RgbImage;

use crate::decode::decode_base64_image;
use crate::pipeline::PipelineError;
use crate::preprocess::{encode_png, to_grayscale};
use crate::recognizer::OcrBackend;

/// Grayscale → PNG → OCR → trim. No text recognized is an empty string, not an error.
pub struct TextExtractor<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> TextExtractor<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn extract(&self, image: &RgbImage) -> Result<String, PipelineError> {
        let png = encode_png(&to_grayscale(image))?;
        let text = self.recognizer.recognize(&png)?;
        Ok(text.trim().to_string())
    }

    pub fn extract_base64(&self, payload: &str) -> Result<String, PipelineError> {
        let image = decode_base64_image(payload)?;
        self.extract(&image)
    }
}
