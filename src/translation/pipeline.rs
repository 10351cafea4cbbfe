//! URL to sentence-pair translation, with cache replay.

use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::extractor::{ExtractError, Extractor};
use super::lines::assemble_lines;
use super::parser::parse_pair;
use super::prompt::{RESPONSE_SEED, SYSTEM_PROMPT, build_translation_prompt};
use super::types::{Phase, PipelineEvent, SentencePair};
use crate::cache::{ArticleKey, CacheError, CacheStore};
use crate::llm::{LanguageModel, ModelError, ModelRequest, Turn};
use crate::text::normalize;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("article extraction failed: {0}")]
    ExtractionFailed(#[source] ExtractError),

    #[error("language model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    pub max_tokens: u32,
    /// Seed the reply with `["` to keep the model on the JSONL format.
    pub prefill: bool,
    /// Pause between pairs during a cache replay.
    pub replay_delay: Duration,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            max_tokens: 8192,
            prefill: true,
            replay_delay: Duration::from_millis(200),
        }
    }
}

/// Produces the sentence pairs of an article, live or from the cache.
pub struct Translator {
    model: Arc<dyn LanguageModel>,
    extractor: Arc<dyn Extractor>,
    cache: Option<CacheStore>,
    options: TranslatorOptions,
}

impl Translator {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        extractor: Arc<dyn Extractor>,
        cache: Option<CacheStore>,
        options: TranslatorOptions,
    ) -> Self {
        Self {
            model,
            extractor,
            cache,
            options,
        }
    }

    pub const fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Streams the article at `url` as phase events and sentence pairs.
    ///
    /// A cached article is replayed pair by pair followed by `Done`. Otherwise
    /// the article is extracted, translated and its pairs yielded as soon as
    /// each line of the reply parses; malformed lines are skipped. The full
    /// result is cached only after the model stream ends, and only if it
    /// holds at least one pair. Extraction and model failures are yielded as
    /// the final item.
    ///
    /// Dropping the stream cancels the run: the extractor process is killed
    /// and the model response abandoned, and nothing is cached.
    pub fn translate<'a>(
        &'a self,
        url: &'a str,
    ) -> impl Stream<Item = Result<PipelineEvent, PipelineError>> + Send + 'a {
        async_stream::stream! {
            let key = ArticleKey::for_url(url);

            match self.cached_pairs(&key) {
                Ok(Some(pairs)) => {
                    info!(url, key = %key, pairs = pairs.len(), "replaying cached translation");
                    for (index, pair) in pairs.into_iter().enumerate() {
                        if index > 0 && !self.options.replay_delay.is_zero() {
                            tokio::time::sleep(self.options.replay_delay).await;
                        }
                        yield Ok(PipelineEvent::Pair(pair));
                    }
                    yield Ok(PipelineEvent::Phase(Phase::Done));
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    yield Err(PipelineError::Cache(e));
                    return;
                }
            }

            info!(url, "fetching article");
            yield Ok(PipelineEvent::Phase(Phase::Fetching));
            let raw = match self.extractor.extract(url).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(url, error = %e, "article extraction failed");
                    yield Err(PipelineError::ExtractionFailed(e));
                    return;
                }
            };

            yield Ok(PipelineEvent::Phase(Phase::Extracting));
            let text = normalize(&raw);
            debug!(url, chars = text.chars().count(), "normalized article text");

            yield Ok(PipelineEvent::Phase(Phase::Translating));
            let chunks = match self.model.stream(self.translation_request(&text)).await {
                Ok(chunks) => chunks,
                Err(e) => {
                    warn!(url, error = %e, "translation request failed");
                    yield Err(PipelineError::ModelUnavailable(e));
                    return;
                }
            };

            let mut lines = std::pin::pin!(assemble_lines(chunks));
            let mut pairs = Vec::new();

            while let Some(line_result) = lines.next().await {
                let line = match line_result {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(url, error = %e, pairs = pairs.len(), "translation stream failed");
                        yield Err(PipelineError::ModelUnavailable(e));
                        return;
                    }
                };

                match parse_pair(&line) {
                    Some(pair) => {
                        pairs.push(pair.clone());
                        yield Ok(PipelineEvent::Pair(pair));
                    }
                    None => warn!(line = %line, "skipping malformed line from model"),
                }
            }

            self.persist(&key, &pairs);
            info!(url, pairs = pairs.len(), "translation finished");
            yield Ok(PipelineEvent::Phase(Phase::Done));
        }
    }

    /// Like [`Translator::translate`] but yields only the sentence pairs.
    pub fn pairs<'a>(
        &'a self,
        url: &'a str,
    ) -> impl Stream<Item = Result<SentencePair, PipelineError>> + Send + 'a {
        self.translate(url).filter_map(|event| async move {
            match event {
                Ok(event) => event.into_pair().map(Ok),
                Err(e) => Some(Err(e)),
            }
        })
    }

    pub fn translation_request(&self, article_text: &str) -> ModelRequest {
        ModelRequest {
            system: SYSTEM_PROMPT.to_string(),
            messages: vec![Turn::user(build_translation_prompt(article_text))],
            prefill: self.options.prefill.then(|| RESPONSE_SEED.to_string()),
            max_tokens: self.options.max_tokens,
        }
    }

    /// Returns the cached pairs for `key`, if a usable entry exists. An entry
    /// without any readable pair is discarded so the article is translated
    /// again.
    fn cached_pairs(&self, key: &ArticleKey) -> Result<Option<Vec<SentencePair>>, CacheError> {
        let Some(cache) = &self.cache else {
            return Ok(None);
        };
        if !cache.exists(key) {
            return Ok(None);
        }

        match cache.load(key) {
            Ok(pairs) => Ok(Some(pairs)),
            Err(CacheError::Empty { .. }) => {
                warn!(key = %key, "discarding cache entry without readable pairs");
                cache.remove(key)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self, key: &ArticleKey, pairs: &[SentencePair]) {
        let Some(cache) = &self.cache else {
            return;
        };
        if pairs.is_empty() {
            warn!(key = %key, "model produced no sentence pairs, not caching");
            return;
        }
        if let Err(e) = cache.save(key, pairs) {
            warn!(key = %key, error = %e, "failed to write cache entry");
        }
    }
}
