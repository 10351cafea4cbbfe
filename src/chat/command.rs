use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/next", "Focus the next sentence"),
    ("/prev", "Focus the previous sentence"),
    ("/goto", "Focus sentence N"),
    ("/all", "Ask about the whole article"),
    ("/show", "Show the focused sentence"),
    ("/history", "Show the conversation so far"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Next,
    Prev,
    /// 1-based sentence number; `None` when missing or not a number.
    Goto(Option<usize>),
    All,
    Show,
    History,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug)]
pub enum Input {
    Query(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Query(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    let command = match parts.first().copied() {
        Some("next" | "n") => SlashCommand::Next,
        Some("prev" | "p") => SlashCommand::Prev,
        Some("goto" | "g") => SlashCommand::Goto(parts.get(1).and_then(|n| n.parse().ok())),
        Some("all") => SlashCommand::All,
        Some("show") => SlashCommand::Show,
        Some("history") => SlashCommand::History,
        Some("help") => SlashCommand::Help,
        Some("quit" | "exit" | "q") => SlashCommand::Quit,
        _ => SlashCommand::Unknown(parts.join(" ")),
    };
    Input::Command(command)
}
