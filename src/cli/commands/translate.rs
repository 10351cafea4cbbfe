use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{build_model, build_translator, load_config};
use crate::cache::encode_jsonl;
use crate::cli::GlobalArgs;
use crate::fs::atomic_write;
use crate::translation::{Phase, PipelineEvent};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub url: String,
    pub output: Option<PathBuf>,
    pub global: GlobalArgs,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config = load_config(&options.global)?;
    let model = build_model(&config);
    let translator = build_translator(&config, model, options.global.no_cache)?;

    let spinner = Spinner::new("Checking cache...");
    let mut events = std::pin::pin!(translator.translate(&options.url));
    let mut pairs = Vec::new();

    while let Some(event) = events.next().await {
        match event.with_context(|| format!("Failed to translate {}", options.url))? {
            PipelineEvent::Phase(Phase::Fetching) => spinner.set_message("Fetching article..."),
            PipelineEvent::Phase(Phase::Extracting) => spinner.set_message("Extracting text..."),
            PipelineEvent::Phase(Phase::Translating) => spinner.set_message("Translating..."),
            PipelineEvent::Phase(Phase::Done) => {}
            PipelineEvent::Pair(pair) => {
                if options.output.is_none() {
                    let line = serde_json::to_string(&pair)?;
                    spinner.suspend(|| -> io::Result<()> {
                        let mut stdout = io::stdout().lock();
                        writeln!(stdout, "{line}")?;
                        stdout.flush()
                    })?;
                }
                pairs.push(pair);
                spinner.set_message(format!("Translating... {} sentences", pairs.len()));
            }
        }
    }
    spinner.stop();

    if pairs.is_empty() {
        bail!("No sentences could be translated from {}", options.url);
    }

    if let Some(path) = &options.output {
        atomic_write(path, &encode_jsonl(&pairs)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!(
            "{} Wrote {} sentences to {}",
            Style::success("✓"),
            pairs.len(),
            Style::value(path.display())
        );
    }

    Ok(())
}
