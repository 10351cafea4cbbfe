use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use langtutor::cli::commands::{chat, translate};
use langtutor::cli::{Args, Command};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "langtutor=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LANGTUTOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.global.verbose);

    match args.command {
        Command::Translate { url, output } => {
            let options = translate::TranslateOptions {
                url,
                output,
                global: args.global,
            };
            translate::run_translate(options).await?;
        }
        Command::Chat { url } => {
            let options = chat::ChatOptions {
                url,
                global: args.global,
            };
            chat::run_chat(options).await?;
        }
    }

    Ok(())
}
