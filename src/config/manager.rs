use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::paths;

pub const DEFAULT_MAX_TOKENS: u32 = 8192;
pub const DEFAULT_REPLAY_DELAY_MS: u64 = 200;
pub const DEFAULT_EXTRACTOR: &[&str] = &["node", "readability/index.js"];

/// Default settings in the `[langtutor]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LangtutorConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    /// Seed translation replies with `["`.
    pub prefill: Option<bool>,
    pub cache_dir: Option<PathBuf>,
    /// Command line of the article extractor; the URL is appended.
    pub extractor: Option<Vec<String>>,
    pub replay_delay_ms: Option<u64>,
}

/// An OpenAI-compatible endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring the environment variable over the file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// Contents of `~/.config/langtutor/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub langtutor: LangtutorConfig,
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Settings after merging CLI flags, the config file and built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub prefill: bool,
    pub cache_dir: PathBuf,
    pub extractor: Vec<String>,
    pub replay_delay: Duration,
}

/// CLI overrides; each takes precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub no_prefill: bool,
    pub cache_dir: Option<PathBuf>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// # Errors
///
/// Returns an error if the provider or model is missing, the provider is not
/// configured, a required API key is absent, or the extractor command is
/// empty.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.langtutor;

    let provider_name = options
        .provider
        .as_ref()
        .or(defaults.provider.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: langtutor --provider <name>\n  \
                 - Config file: ~/.config/langtutor/config.toml"
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/langtutor/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}",
                available.join("\n  - ")
            )
        }
    })?;

    let model = options
        .model
        .as_ref()
        .or(defaults.model.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: langtutor --model <name>\n  \
                 - Config file: ~/.config/langtutor/config.toml"
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        warn!(
            model,
            provider = provider_name,
            configured = provider_config.models.join(", "),
            "model is not in the provider's configured list, proceeding anyway"
        );
    }

    let api_key = provider_config.get_api_key();
    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/langtutor/config.toml"
        );
    }

    let extractor = defaults.extractor.clone().unwrap_or_else(|| {
        DEFAULT_EXTRACTOR
            .iter()
            .map(ToString::to_string)
            .collect()
    });
    if extractor.first().is_none_or(String::is_empty) {
        bail!("Invalid configuration: 'extractor' must name a program");
    }

    let cache_dir = options
        .cache_dir
        .clone()
        .or_else(|| defaults.cache_dir.clone())
        .unwrap_or_else(paths::cache_dir);

    let resolved = ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
        max_tokens: options
            .max_tokens
            .or(defaults.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS),
        prefill: !options.no_prefill && defaults.prefill.unwrap_or(true),
        cache_dir,
        extractor,
        replay_delay: Duration::from_millis(
            defaults.replay_delay_ms.unwrap_or(DEFAULT_REPLAY_DELAY_MS),
        ),
    };
    debug!(
        provider = resolved.provider_name,
        model = resolved.model,
        cache_dir = %resolved.cache_dir.display(),
        "resolved configuration"
    );
    Ok(resolved)
}

/// Locates and reads the config file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `$XDG_CONFIG_HOME/langtutor/config.toml`, or
    /// `~/.config/langtutor/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self::with_path(paths::config_dir().join("config.toml"))
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, falling back to an empty configuration when it
    /// is missing. A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(ConfigFile::default());
        }
        self.load()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
