mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_EXTRACTOR, DEFAULT_MAX_TOKENS, DEFAULT_REPLAY_DELAY_MS,
    LangtutorConfig, ProviderConfig, ResolveOptions, ResolvedConfig, resolve_config,
};
