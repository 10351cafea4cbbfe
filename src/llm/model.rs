use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to connect to API endpoint {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("stream error: {0}")]
    Stream(String),
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single call to the language model.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub system: String,
    /// Conversation so far, ending with the new user turn.
    pub messages: Vec<Turn>,
    /// Fragment the reply is seeded with. Streams re-emit it as the first
    /// chunk so the reply reads as if the model had written it.
    pub prefill: Option<String>,
    pub max_tokens: u32,
}

pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, ModelError>> + Send>>;

/// Access to a chat-style language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Starts a streaming completion. Dropping the stream abandons the call.
    async fn stream(&self, request: ModelRequest) -> Result<TextStream, ModelError>;

    /// One-shot completion; collects the whole stream.
    async fn complete(&self, request: ModelRequest) -> Result<String, ModelError> {
        let mut stream = self.stream(request).await?;
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures_util::stream;

    struct Echo;

    #[async_trait]
    impl LanguageModel for Echo {
        async fn stream(&self, request: ModelRequest) -> Result<TextStream, ModelError> {
            let chunks: Vec<_> = request
                .prefill
                .into_iter()
                .chain(request.messages.into_iter().map(|t| t.content))
                .map(Ok)
                .collect();
            Ok(Box::pin(stream::iter(chunks)))
        }
    }

    struct Broken;

    #[async_trait]
    impl LanguageModel for Broken {
        async fn stream(&self, _request: ModelRequest) -> Result<TextStream, ModelError> {
            Ok(Box::pin(stream::iter(vec![
                Ok("partial".to_string()),
                Err(ModelError::Stream("reset".to_string())),
            ])))
        }
    }

    fn request() -> ModelRequest {
        ModelRequest {
            system: "system".to_string(),
            messages: vec![Turn::user("one"), Turn::user("two")],
            prefill: Some("[\"".to_string()),
            max_tokens: 16,
        }
    }

    #[tokio::test]
    async fn test_complete_collects_stream() {
        let text = Echo.complete(request()).await.unwrap();
        assert_eq!(text, "[\"onetwo");
    }

    #[tokio::test]
    async fn test_complete_propagates_stream_error() {
        let err = Broken.complete(request()).await.unwrap_err();
        assert!(matches!(err, ModelError::Stream(_)));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
