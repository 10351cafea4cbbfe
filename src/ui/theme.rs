//! Semantic styles for terminal output.

use owo_colors::OwoColorize;
use std::fmt::Display;

pub struct Style;

impl Style {
    /// Section headers and the program name.
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels such as sentence numbers.
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Translations and descriptions shown under their primary line.
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    /// Slash commands and the user's side of the conversation.
    pub fn command<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    pub fn version<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }
}
