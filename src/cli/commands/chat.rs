use anyhow::Result;
use std::sync::Arc;

use super::{build_model, build_translator, load_config};
use crate::chat::{ChatRepl, ChatSession};
use crate::cli::GlobalArgs;

pub struct ChatOptions {
    pub url: String,
    pub global: GlobalArgs,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_config(&options.global)?;
    let model = build_model(&config);
    let translator = build_translator(&config, Arc::clone(&model), options.global.no_cache)?;

    let session = ChatSession::new(Arc::new(translator), model, config.max_tokens);
    ChatRepl::new(session).run(&options.url).await
}
