//! Tutoring conversations about a translated article.
//!
//! [`ChatSession`] is the embeddable core; [`ChatRepl`] drives one from the
//! terminal with slash commands for moving the sentence focus.

/// Slash command parsing and autocomplete.
pub mod command;
mod prompt;
mod registry;
mod repl;
mod session;
mod ui;

pub use prompt::{
    QUERY_DELIMITER, SYSTEM_PROMPT_TEMPLATE, build_query_message, build_system_prompt,
    prune_scaffold,
};
pub use registry::{LifecyclePolicy, SessionRegistry, SharedSession};
pub use repl::ChatRepl;
pub use session::{ChatError, ChatSession};
