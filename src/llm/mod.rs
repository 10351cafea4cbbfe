mod client;
mod model;
mod sse_parser;

pub use client::OpenAiClient;
pub use model::{LanguageModel, ModelError, ModelRequest, Role, TextStream, Turn};
