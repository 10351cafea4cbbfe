use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::prompt::{build_query_message, build_system_prompt, prune_scaffold};
use crate::llm::{LanguageModel, ModelError, ModelRequest, Turn};
use crate::translation::{PipelineError, PipelineEvent, SentencePair, Translator};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no article has been loaded into this session")]
    NoArticle,

    #[error("language model unavailable: {0}")]
    Model(#[from] ModelError),
}

/// A tutoring conversation about one article.
///
/// Both streaming operations borrow the session mutably for as long as the
/// stream lives, so a session only ever runs one of them at a time. Hosts
/// sharing sessions wrap them in a mutex (see `SessionRegistry`).
pub struct ChatSession {
    translator: Arc<Translator>,
    model: Arc<dyn LanguageModel>,
    max_tokens: u32,
    article: Vec<SentencePair>,
    system: Option<String>,
    history: Vec<Turn>,
}

impl ChatSession {
    pub fn new(translator: Arc<Translator>, model: Arc<dyn LanguageModel>, max_tokens: u32) -> Self {
        Self {
            translator,
            model,
            max_tokens,
            article: Vec::new(),
            system: None,
            history: Vec::new(),
        }
    }

    pub fn article(&self) -> &[SentencePair] {
        &self.article
    }

    /// System prompt built from the last completed article, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Conversation so far with prompt framing stripped from user turns.
    pub fn history(&self) -> Vec<Turn> {
        self.history.iter().map(prune_scaffold).collect()
    }

    /// Loads the article at `url`, yielding its translation events as they
    /// arrive.
    ///
    /// The previous article and conversation are dropped immediately. The
    /// system prompt is rebuilt only once the translation completes; a failed
    /// or abandoned run leaves the session without one.
    pub fn set_article<'a>(
        &'a mut self,
        url: &'a str,
    ) -> impl Stream<Item = Result<PipelineEvent, PipelineError>> + Send + 'a {
        async_stream::stream! {
            self.article.clear();
            self.system = None;
            self.history.clear();

            let translator = Arc::clone(&self.translator);
            let mut events = std::pin::pin!(translator.translate(url));

            while let Some(event) = events.next().await {
                match event {
                    Ok(PipelineEvent::Pair(pair)) => {
                        self.article.push(pair.clone());
                        yield Ok(PipelineEvent::Pair(pair));
                    }
                    Ok(phase) => yield Ok(phase),
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }

            self.system = Some(build_system_prompt(&self.article));
            info!(url, pairs = self.article.len(), "article ready for chat");
        }
    }

    /// Asks about the article, streaming the reply.
    ///
    /// With `focus`, the question is framed around that sentence; without it
    /// the whole article is in scope. The framed question and the full reply
    /// are appended to the history once the reply completes.
    pub fn stream_query<'a>(
        &'a mut self,
        query: &'a str,
        focus: Option<SentencePair>,
    ) -> impl Stream<Item = Result<String, ChatError>> + Send + 'a {
        async_stream::stream! {
            let system = match &self.system {
                Some(system) => system.clone(),
                None => {
                    yield Err(ChatError::NoArticle);
                    return;
                }
            };

            let message = build_query_message(query, focus.as_ref());
            let mut messages = self.history.clone();
            messages.push(Turn::user(message.clone()));

            let request = ModelRequest {
                system,
                messages,
                prefill: None,
                max_tokens: self.max_tokens,
            };

            debug!(history = self.history.len(), focused = focus.is_some(), "sending chat query");

            let mut chunks = match self.model.stream(request).await {
                Ok(chunks) => chunks,
                Err(e) => {
                    yield Err(ChatError::Model(e));
                    return;
                }
            };

            let mut reply = String::new();
            while let Some(chunk_result) = chunks.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        reply.push_str(&chunk);
                        yield Ok(chunk);
                    }
                    Err(e) => {
                        yield Err(ChatError::Model(e));
                        return;
                    }
                }
            }

            self.history.push(Turn::user(message));
            self.history.push(Turn::assistant(reply));
        }
    }
}
