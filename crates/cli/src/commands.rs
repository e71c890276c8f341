use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ordo_core::{normalize, SortOutcome, SortRequest};
use ordo_ocr::{backend_from_config, OcrBackend, OcrConfig, SortPipeline, TracingObserver};
use serde::Serialize;

use crate::OutputFormat;

const CONFIG_FILE: &str = "config.toml";

/// Command-line values that win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub data_path: Option<String>,
    pub language: Option<String>,
    pub page_segmentation_mode: Option<u8>,
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "ordo", "ordo").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// An explicit path must exist; the default path is optional.
pub fn load_config(explicit: Option<&Path>, overrides: Overrides) -> Result<OcrConfig> {
    let mut config = match explicit {
        Some(path) => read_config(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path)?,
            _ => OcrConfig::default(),
        },
    };

    if let Some(data_path) = overrides.data_path {
        config.data_path = Some(data_path);
    }
    if let Some(language) = overrides.language {
        config.language = language;
    }
    if let Some(psm) = overrides.page_segmentation_mode {
        config.page_segmentation_mode = psm;
    }

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<OcrConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = OcrConfig::from_toml(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub async fn sort(request: &Path, config: &OcrConfig, format: OutputFormat) -> Result<String> {
    let pipeline = SortPipeline::new(backend_from_config(config)?);
    let outcome = run_sort(&pipeline, request).await?;
    render(&outcome, format)
}

async fn run_sort<R: OcrBackend>(pipeline: &SortPipeline<R>, request: &Path) -> Result<SortOutcome> {
    if request == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read request from stdin")?;
        let request = SortRequest::from_json(&json).context("Malformed request on stdin")?;
        return Ok(pipeline.sort(&request, &TracingObserver)?);
    }

    pipeline
        .sort_file(request, &TracingObserver)
        .await
        .with_context(|| format!("Failed to sort {}", request.display()))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    order: String,
    #[serde(flatten)]
    outcome: &'a SortOutcome,
}

fn render(outcome: &SortOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let report = JsonReport { order: outcome.joined_keys("+"), outcome };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let mut lines: Vec<String> = outcome
                .ordered
                .iter()
                .map(|r| format!("{}\t{}", r.key, r.token))
                .collect();
            lines.push(outcome.joined_keys("+"));
            Ok(lines.join("\n"))
        }
    }
}

pub fn normalize_lines(texts: &[String]) -> Vec<String> {
    texts
        .iter()
        .map(|text| format!("{text}\t{}", normalize(text)))
        .collect()
}
