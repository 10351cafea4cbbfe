//! Chat mode UI components.

use crate::llm::{Role, Turn};
use crate::translation::SentencePair;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(sentences: usize) {
    println!(
        "{} {} - Article Tutor Mode",
        Style::header("langtutor"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{}",
        Style::hint(format!(
            "{sentences} sentences loaded. Use /next and /prev to move through them."
        ))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_focus(focus: Option<(usize, &SentencePair)>, total: usize) {
    match focus {
        Some((index, pair)) => {
            println!(
                "{}",
                Style::header(format!("Sentence {} of {total}", index + 1))
            );
            println!("  {}", Style::value(&pair.original));
            println!("  {}", Style::secondary(&pair.translation));
        }
        None => println!("{}", Style::header("Whole article")),
    }
    println!();
}

pub fn print_history(turns: &[Turn]) {
    if turns.is_empty() {
        println!("{}", Style::hint("No questions asked yet."));
        println!();
        return;
    }

    for turn in turns {
        let speaker = match turn.role {
            Role::User => Style::command("you"),
            Role::Assistant => Style::value("tutor"),
            Role::System => Style::label("system"),
        };
        println!("{speaker} {}", turn.content);
        println!();
    }
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let commands = [
        ("/next", "Focus the next sentence"),
        ("/prev", "Focus the previous sentence"),
        ("/goto N", "Focus sentence N"),
        ("/all", "Ask about the whole article"),
        ("/show", "Show the focused sentence"),
        ("/history", "Show the conversation so far"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];
    for (command, description) in commands {
        println!(
            "  {:<10} {}",
            Style::command(command),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
