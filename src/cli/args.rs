use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "langtutor")]
#[command(about = "Read foreign-language articles sentence by sentence with an AI tutor")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides shared by every subcommand.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Provider name from the config file
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Maximum tokens per model reply
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Do not seed translation replies with `["`
    #[arg(long, global = true)]
    pub no_prefill: bool,

    /// Directory holding cached translations
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Neither replay nor store cached translations
    #[arg(short = 'n', long, global = true)]
    pub no_cache: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate an article into sentence pairs (JSON lines)
    Translate {
        /// Article URL
        url: String,

        /// Write the pairs to FILE instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Translate an article, then ask the tutor about it
    Chat {
        /// Article URL
        url: String,
    },
}
