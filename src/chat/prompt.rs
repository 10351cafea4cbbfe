use crate::llm::{Role, Turn};
use crate::translation::SentencePair;

pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a helpful and playful language assistant. \
     Answer in plain text, using markdown only for lists or emphasis. \
     The user is reading a side-by-side translation of a news article and wants to learn \
     the language it is written in. Answer their questions about the text, the translation, \
     or the original language itself. Here is the full text of the article with its \
     translation, sentence by sentence:\n\n\
     BEGIN TEXT\n\n\
     {text}\n\n\
     END TEXT\n\n\
     Each user message may start with the sentence the user is currently looking at.";

/// Separates the injected sentence focus from what the user actually typed.
pub const QUERY_DELIMITER: &str = "Now answer the following query from the user:";

const NO_FOCUS: &str =
    "The user is not currently looking at a specific sentence, so consider the entire article.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(article: &[SentencePair]) -> String {
    let text = article
        .iter()
        .map(|pair| format!("{}\n{}", pair.original, pair.translation))
        .collect::<Vec<_>>()
        .join("\n\n");
    // {text} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replace("{text}", &text)
}

/// Frames a user query with the sentence in focus, or with a note that the
/// whole article is in scope.
pub fn build_query_message(query: &str, focus: Option<&SentencePair>) -> String {
    let context = focus.map_or_else(
        || NO_FOCUS.to_string(),
        |pair| {
            format!(
                "The user is currently looking at the sentence:\n\n\
                 ORIGINAL:\n\n{}\n\n\
                 TRANSLATION:\n\n{}",
                pair.original, pair.translation
            )
        },
    );
    format!("{context}\n\n{QUERY_DELIMITER}\n\n{query}")
}

/// Strips the injected framing from a user turn, leaving only the query.
///
/// Other turns are returned unchanged.
pub fn prune_scaffold(turn: &Turn) -> Turn {
    if turn.role == Role::User
        && let Some((_, query)) = turn.content.split_once(QUERY_DELIMITER)
    {
        return Turn::user(query.trim());
    }
    turn.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Vec<SentencePair> {
        vec![
            SentencePair::new("Der Hund bellt.", "The dog barks."),
            SentencePair::new("Die Katze schläft.", "The cat sleeps."),
        ]
    }

    #[test]
    fn test_system_prompt_contains_article() {
        let prompt = build_system_prompt(&article());
        assert!(prompt.contains(
            "BEGIN TEXT\n\nDer Hund bellt.\nThe dog barks.\n\nDie Katze schläft.\nThe cat sleeps.\n\nEND TEXT"
        ));
        assert!(!prompt.contains("{text}"));
    }

    #[test]
    fn test_system_prompt_template_has_placeholder() {
        assert!(SYSTEM_PROMPT_TEMPLATE.contains("{text}"));
    }

    #[test]
    fn test_query_message_with_focus() {
        let article = article();
        let message = build_query_message("What tense is this?", Some(&article[1]));
        assert!(message.contains("ORIGINAL:\n\nDie Katze schläft."));
        assert!(message.contains("TRANSLATION:\n\nThe cat sleeps."));
        assert!(!message.contains("Der Hund bellt."));
        assert!(message.ends_with(&format!("{QUERY_DELIMITER}\n\nWhat tense is this?")));
    }

    #[test]
    fn test_query_message_without_focus() {
        let message = build_query_message("Summarize it", None);
        assert!(message.starts_with(NO_FOCUS));
        assert!(message.ends_with("Summarize it"));
    }

    #[test]
    fn test_prune_scaffold_keeps_only_query() {
        let turn = Turn::user(format!("{QUERY_DELIMITER}\nWhat does this mean?"));
        assert_eq!(prune_scaffold(&turn).content, "What does this mean?");
    }

    #[test]
    fn test_prune_scaffold_full_message() {
        let article = article();
        let turn = Turn::user(build_query_message("Why \"schläft\"?", Some(&article[1])));
        assert_eq!(prune_scaffold(&turn), Turn::user("Why \"schläft\"?"));
    }

    #[test]
    fn test_prune_scaffold_leaves_other_turns() {
        let plain = Turn::user("no framing here");
        assert_eq!(prune_scaffold(&plain), plain);

        let reply = Turn::assistant(format!("{QUERY_DELIMITER} quoted back"));
        assert_eq!(prune_scaffold(&reply), reply);
    }
}
