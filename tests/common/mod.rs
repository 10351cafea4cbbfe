#![allow(dead_code, clippy::unwrap_used)]
//! Scripted fakes for the model and extractor capabilities.

use async_trait::async_trait;
use futures_util::stream;
use langtutor::llm::{LanguageModel, ModelError, ModelRequest, TextStream};
use langtutor::translation::{ExtractError, Extractor};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted reply: the chunks to stream, optionally ending in an error.
#[derive(Clone, Default)]
pub struct Reply {
    pub chunks: Vec<String>,
    pub fail_after: bool,
}

impl Reply {
    pub fn chunks(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(ToString::to_string).collect(),
            fail_after: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail_after = true;
        self
    }
}

/// Streams scripted replies in order and records every request. Once the
/// script runs out the last reply is repeated.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Vec<Reply>,
    unavailable: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            ..Self::default()
        }
    }

    /// A model whose every call is rejected up front.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn stream(&self, request: ModelRequest) -> Result<TextStream, ModelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if self.unavailable {
            return Err(ModelError::Status {
                status: 503,
                body: "overloaded".to_string(),
            });
        }

        let reply = self
            .replies
            .get(call)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_default();

        let mut items: Vec<Result<String, ModelError>> =
            reply.chunks.into_iter().map(Ok).collect();
        if reply.fail_after {
            items.push(Err(ModelError::Stream("connection reset".to_string())));
        }
        Ok(Box::pin(stream::iter(items)))
    }
}

/// Returns fixed article text, or fails, and counts its calls.
pub struct FakeExtractor {
    text: Option<String>,
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub const fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, _url: &str) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or(ExtractError::Empty)
    }
}

/// A reply translating three German sentences, split mid-line across chunks.
pub fn three_sentence_reply() -> Reply {
    Reply::chunks(&[
        "[\"Der Hund bellt.\", \"The dog ",
        "barks.\"]\n[\"Die Katze",
        " schläft.\", \"The cat sleeps.\"]\n",
        "[\"Es regnet.\", ",
        "\"It is raining.\"]",
    ])
}
