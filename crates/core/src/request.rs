use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::normalize::Token;

/// Candidate images keyed by an opaque identifier, in input order.
///
/// Deserialises from a JSON object without losing key order. A key that
/// appears twice keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateImages(Vec<(String, String)>);

impl CandidateImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, payload: impl Into<String>) {
        let key = key.into();
        let payload = payload.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = payload,
            None => self.0.push((key, payload)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CandidateImages {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut images = Self::new();
        for (k, v) in iter {
            images.insert(k, v);
        }
        images
    }
}

struct CandidateImagesVisitor;

impl<'de> Visitor<'de> for CandidateImagesVisitor {
    type Value = CandidateImages;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of image keys to base64 payloads")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut images = CandidateImages::new();
        while let Some((key, payload)) = access.next_entry::<String, String>()? {
            images.insert(key, payload);
        }
        Ok(images)
    }
}

impl<'de> Deserialize<'de> for CandidateImages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CandidateImagesVisitor)
    }
}

impl Serialize for CandidateImages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// One reference image and the candidates to reorder against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRequest {
    /// Base64 payload of the reference image.
    pub main: String,
    #[serde(default)]
    pub images: CandidateImages,
}

impl SortRequest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedImage {
    pub key: String,
    pub token: Token,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOutcome {
    /// Trimmed OCR text of the reference image.
    pub main_text: String,
    pub main_sequence: Vec<Token>,
    pub ordered: Vec<RankedImage>,
}

impl SortOutcome {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(|r| r.key.as_str())
    }

    pub fn joined_keys(&self, separator: &str) -> String {
        self.keys().collect::<Vec<_>>().join(separator)
    }
}
