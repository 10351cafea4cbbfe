mod extractor;
mod lines;
mod parser;
mod pipeline;
mod prompt;
mod types;

pub use extractor::{CommandExtractor, ExtractError, Extractor};
pub use lines::{LineAssembler, assemble_lines};
pub use parser::parse_pair;
pub use pipeline::{PipelineError, Translator, TranslatorOptions};
pub use prompt::{RESPONSE_SEED, SYSTEM_PROMPT, TASK_PROMPT, build_translation_prompt};
pub use types::{Phase, PipelineEvent, SentencePair};
