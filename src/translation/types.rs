use serde::{Deserialize, Serialize};

/// One sentence of the source article alongside its English translation.
///
/// Serialized as a two-element JSON array `["original", "translation"]`,
/// which is both the model's output format and the cache line format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SentencePair {
    pub original: String,
    pub translation: String,
}

impl SentencePair {
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
        }
    }
}

impl From<(String, String)> for SentencePair {
    fn from((original, translation): (String, String)) -> Self {
        Self {
            original,
            translation,
        }
    }
}

impl From<SentencePair> for (String, String) {
    fn from(pair: SentencePair) -> Self {
        (pair.original, pair.translation)
    }
}

/// Progress phases reported by a live translation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The extractor is fetching the article.
    Fetching,
    /// Article text arrived and is being cleaned up.
    Extracting,
    /// The model is translating; pairs follow.
    Translating,
    /// The run finished (also emitted after a cache replay).
    Done,
}

/// A single item of the translation stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Phase(Phase),
    Pair(SentencePair),
}

impl PipelineEvent {
    pub fn into_pair(self) -> Option<SentencePair> {
        match self {
            Self::Pair(pair) => Some(pair),
            Self::Phase(_) => None,
        }
    }
}
