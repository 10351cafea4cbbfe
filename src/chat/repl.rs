use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, Write};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::session::ChatSession;
use super::ui;
use crate::translation::{Phase, PipelineEvent, SentencePair};
use crate::ui::Spinner;

/// Interactive tutoring loop over a single article.
pub struct ChatRepl {
    session: ChatSession,
    focus: Option<usize>,
}

impl ChatRepl {
    pub const fn new(session: ChatSession) -> Self {
        Self {
            session,
            focus: None,
        }
    }

    pub const fn focus(&self) -> Option<usize> {
        self.focus
    }

    fn focused_pair(&self) -> Option<&SentencePair> {
        self.focus.and_then(|i| self.session.article().get(i))
    }

    /// Translates the article at `url` and starts the prompt loop.
    pub async fn run(&mut self, url: &str) -> Result<()> {
        self.load_article(url).await?;
        let total = self.session.article().len();
        if total == 0 {
            bail!("No sentences could be extracted from {url}");
        }
        self.focus = Some(0);

        ui::print_header(total);
        ui::print_focus(self.focused_pair().map(|p| (0, p)), total);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Ask about the sentence, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Query(query) => {
                        if let Err(e) = self.ask(&query).await {
                            ui::print_error(&format!("{e:#}"));
                        }
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    async fn load_article(&mut self, url: &str) -> Result<()> {
        let spinner = Spinner::new("Fetching article...");
        let mut events = std::pin::pin!(self.session.set_article(url));

        while let Some(event) = events.next().await {
            match event.context("Failed to load article")? {
                PipelineEvent::Phase(Phase::Fetching) => spinner.set_message("Fetching article..."),
                PipelineEvent::Phase(Phase::Extracting) => {
                    spinner.set_message("Extracting text...");
                }
                PipelineEvent::Phase(Phase::Translating) => {
                    spinner.set_message("Translating...");
                }
                PipelineEvent::Phase(Phase::Done) => {}
                PipelineEvent::Pair(pair) => {
                    spinner.set_message(format!("Translating... {}", truncate(&pair.original, 40)));
                }
            }
        }

        spinner.stop();
        Ok(())
    }

    /// Returns `false` when the loop should exit.
    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        let total = self.session.article().len();
        match cmd {
            SlashCommand::Next => {
                self.focus = Some(step_focus(self.focus, 1, total));
                self.show_focus();
            }
            SlashCommand::Prev => {
                self.focus = Some(step_focus(self.focus, -1, total));
                self.show_focus();
            }
            SlashCommand::Goto(Some(n)) if (1..=total).contains(&n) => {
                self.focus = Some(n - 1);
                self.show_focus();
            }
            SlashCommand::Goto(_) => {
                ui::print_error(&format!("Usage: /goto <1-{total}>"));
            }
            SlashCommand::All => {
                self.focus = None;
                self.show_focus();
            }
            SlashCommand::Show => self.show_focus(),
            SlashCommand::History => ui::print_history(&self.session.history()),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    fn show_focus(&self) {
        let total = self.session.article().len();
        let focus = self
            .focus
            .and_then(|i| self.session.article().get(i).map(|p| (i, p)));
        ui::print_focus(focus, total);
    }

    async fn ask(&mut self, query: &str) -> Result<()> {
        let focus = self.focused_pair().cloned();
        let spinner = Spinner::new("Thinking...");

        let mut stream = std::pin::pin!(self.session.stream_query(query, focus));
        let mut first_chunk = true;

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;

            if first_chunk {
                spinner.stop();
                first_chunk = false;
            }

            print!("{chunk}");
            io::stdout().flush()?;
        }

        if first_chunk {
            spinner.stop();
        }

        println!();
        println!();
        Ok(())
    }
}

/// Moves the focus by `delta`, clamped to the article. No focus starts from
/// the first sentence.
fn step_focus(focus: Option<usize>, delta: isize, total: usize) -> usize {
    let last = total.saturating_sub(1);
    focus.map_or(0, |i| i.saturating_add_signed(delta).min(last))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}…")
}
