use async_trait::async_trait;
use futures_util::{StreamExt, stream};
use reqwest::Client;
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

use super::model::{LanguageModel, ModelError, ModelRequest, Role, TextStream};
use super::sse_parser::sse_to_text_stream;

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: Role,
    content: Cow<'a, str>,
}

/// Streaming client for OpenAI-compatible `/v1/chat/completions` endpoints.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }
}

/// Lays out the wire messages: system prompt, conversation, then the prefill
/// as a trailing assistant turn the model continues from.
fn build_messages(request: &ModelRequest) -> Vec<Message<'_>> {
    let mut messages = Vec::with_capacity(request.messages.len() + 2);
    messages.push(Message {
        role: Role::System,
        content: Cow::Borrowed(&request.system),
    });
    messages.extend(request.messages.iter().map(|turn| Message {
        role: turn.role,
        content: Cow::Borrowed(&turn.content),
    }));
    if let Some(prefill) = &request.prefill {
        messages.push(Message {
            role: Role::Assistant,
            content: Cow::Borrowed(prefill),
        });
    }
    messages
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn stream(&self, request: ModelRequest) -> Result<TextStream, ModelError> {
        let url = self.completions_url();

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(&request),
            max_tokens: request.max_tokens,
            stream: true,
        };

        debug!(
            url = %url,
            model = %self.model,
            messages = chat_request.messages.len(),
            "starting completion stream"
        );

        let mut http_request = self.client.post(&url).json(&chat_request);

        // Add Authorization header if API key is present
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|source| ModelError::Connect {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, body });
        }

        let text = sse_to_text_stream(response.bytes_stream());
        let seeded = stream::iter(request.prefill.map(Ok)).chain(text);

        Ok(Box::pin(seeded))
    }
}
