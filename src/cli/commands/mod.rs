//! Subcommand implementations.

use anyhow::{Context, Result};
use std::sync::Arc;

use super::GlobalArgs;
use crate::cache::CacheStore;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::llm::{LanguageModel, OpenAiClient};
use crate::translation::{CommandExtractor, Translator, TranslatorOptions};

/// Chat mode command handler.
pub mod chat;

/// Translation command handler.
pub mod translate;

/// Loads the config file and applies the global CLI overrides.
pub fn load_config(global: &GlobalArgs) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new();
    let file = manager.load_or_default()?;
    let options = ResolveOptions {
        provider: global.provider.clone(),
        model: global.model.clone(),
        max_tokens: global.max_tokens,
        no_prefill: global.no_prefill,
        cache_dir: global.cache_dir.clone(),
    };
    resolve_config(&options, &file)
}

/// The model client shared by translation and chat.
pub fn build_model(config: &ResolvedConfig) -> Arc<dyn LanguageModel> {
    Arc::new(OpenAiClient::new(
        config.endpoint.clone(),
        config.model.clone(),
        config.api_key.clone(),
    ))
}

pub fn build_translator(
    config: &ResolvedConfig,
    model: Arc<dyn LanguageModel>,
    no_cache: bool,
) -> Result<Translator> {
    let extractor = CommandExtractor::from_argv(&config.extractor)
        .context("Invalid configuration: 'extractor' must name a program")?;

    let cache = if no_cache {
        None
    } else {
        Some(CacheStore::new(config.cache_dir.clone()).with_context(|| {
            format!(
                "Failed to open cache directory: {}",
                config.cache_dir.display()
            )
        })?)
    };

    Ok(Translator::new(
        model,
        Arc::new(extractor),
        cache,
        TranslatorOptions {
            max_tokens: config.max_tokens,
            prefill: config.prefill,
            replay_delay: config.replay_delay,
        },
    ))
}
