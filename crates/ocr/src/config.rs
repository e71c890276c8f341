use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tesseract page segmentation mode 6: assume a single uniform block of text.
pub const SINGLE_BLOCK_PSM: u8 = 6;
const MAX_PSM: u8 = 13;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Page segmentation mode must be 0-13, got {0}")]
    PageSegmentationMode(u8),
    #[error("Language must not be empty")]
    EmptyLanguage,
}

/// OCR engine settings, read from the `[ocr]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OcrConfig {
    /// Directory holding `*.traineddata`; `None` uses the engine's default lookup.
    pub data_path: Option<String>,
    pub language: String,
    pub page_segmentation_mode: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            language: "eng".to_string(),
            page_segmentation_mode: SINGLE_BLOCK_PSM,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    ocr: OcrConfig,
}

impl OcrConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_content)?;
        file.ocr.validate()?;
        Ok(file.ocr)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_segmentation_mode > MAX_PSM {
            return Err(ConfigError::PageSegmentationMode(self.page_segmentation_mode));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        Ok(())
    }
}
