use std::path::Path;

use ordo_core::{
    main_sequence, normalize, rank_candidates, RankedImage, SortObserver, SortOutcome,
    SortRequest, Token,
};
use thiserror::Error;

use crate::decode::DecodeError;
use crate::extract::TextExtractor;
use crate::preprocess::PreprocessError;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image decoding failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Candidate '{key}': {source}")]
    Candidate {
        key: String,
        #[source]
        source: Box<PipelineError>,
    },
}

/// Orchestrates: OCR main → OCR each candidate → normalize → rank.
///
/// Images are processed one at a time, main first, candidates in input
/// order. The first failure aborts the whole run.
pub struct SortPipeline<R: OcrBackend> {
    extractor: TextExtractor<R>,
}

impl<R: OcrBackend> SortPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { extractor: TextExtractor::new(recognizer) }
    }

    pub fn extractor(&self) -> &TextExtractor<R> {
        &self.extractor
    }

    pub fn sort(
        &self,
        request: &SortRequest,
        observer: &dyn SortObserver,
    ) -> Result<SortOutcome, PipelineError> {
        let main_text = self.extractor.extract_base64(&request.main)?;
        let sequence = main_sequence(&main_text);

        let mut candidates: Vec<(String, Token)> = Vec::with_capacity(request.images.len());
        for (key, payload) in request.images.iter() {
            let raw = self
                .extractor
                .extract_base64(payload)
                .map_err(|e| PipelineError::Candidate {
                    key: key.to_string(),
                    source: Box::new(e),
                })?;
            let token = normalize(&raw);
            observer.candidate_read(key, &raw, &token);
            candidates.push((key.to_string(), token));
        }
        observer.main_read(&main_text, &sequence);

        let ordered = rank_candidates(&sequence, candidates)
            .into_iter()
            .map(|(key, token)| RankedImage { key, token })
            .collect();

        let outcome = SortOutcome {
            main_text,
            main_sequence: sequence,
            ordered,
        };
        observer.sorted(&outcome);
        Ok(outcome)
    }

    /// Read a JSON request from disk and sort it.
    pub async fn sort_file(
        &self,
        path: &Path,
        observer: &dyn SortObserver,
    ) -> Result<SortOutcome, PipelineError> {
        let json = tokio::fs::read_to_string(path).await?;
        let request = SortRequest::from_json(&json)?;
        self.sort(&request, observer)
    }
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Reports each step of a run through `tracing`.
pub struct TracingObserver;

impl SortObserver for TracingObserver {
    fn candidate_read(&self, key: &str, raw: &str, token: &Token) {
        tracing::info!(key, raw, normalized = %token, "Candidate read");
    }

    fn main_read(&self, raw: &str, sequence: &[Token]) {
        let tokens: Vec<&str> = sequence.iter().map(Token::as_str).collect();
        tracing::info!(text = raw, ?tokens, "Main image read");
    }

    fn sorted(&self, outcome: &SortOutcome) {
        let unmatched = outcome
            .ordered
            .iter()
            .filter(|r| !outcome.main_sequence.contains(&r.token))
            .count();
        if unmatched > 0 {
            tracing::warn!(unmatched, "Some candidates did not match the main image");
        }
        tracing::info!(order = %outcome.joined_keys("+"), "Sorted");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
