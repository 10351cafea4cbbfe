//! # langtutor - read foreign-language articles with an AI tutor
//!
//! `langtutor` extracts the text of a web article, has a language model
//! translate it sentence by sentence, and streams the resulting pairs as they
//! are produced. Translated articles are cached on disk and replayed on later
//! requests. A chat session then answers questions about the article, framed
//! around whichever sentence the reader is looking at.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print sentence pairs as JSON lines
//! langtutor translate https://example.com/article
//!
//! # Translate, then ask questions sentence by sentence
//! langtutor chat https://example.com/article
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/langtutor/config.toml`:
//!
//! ```toml
//! [langtutor]
//! provider = "openrouter"
//! model = "anthropic/claude-3.5-sonnet"
//!
//! [providers.openrouter]
//! endpoint = "https://openrouter.ai/api"
//! api_key_env = "OPENROUTER_API_KEY"
//! ```

/// On-disk JSONL cache of translated articles.
pub mod cache;

/// Tutoring conversations about a translated article.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Language model access over OpenAI-compatible APIs.
pub mod llm;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Article text cleanup.
pub mod text;

/// Article extraction and sentence-pair translation.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
