//! Cleanup of raw article text before it is sent for translation.

use regex::Regex;
use std::sync::LazyLock;

// unwrap is safe: the patterns below are compile-time constants
#[allow(clippy::unwrap_used)]
static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\x{00A0}\x{200B}]+").unwrap());

#[allow(clippy::unwrap_used)]
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

#[allow(clippy::unwrap_used)]
static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes whitespace in extracted article text.
///
/// Tabs, non-breaking spaces and zero-width spaces become a single space,
/// carriage returns are dropped, space runs collapse to one space and three or
/// more newlines collapse to a paragraph break. The result is trimmed.
pub fn normalize(text: &str) -> String {
    let text = INLINE_SPACE.replace_all(text, " ");
    let text = text.replace('\r', "");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = NEWLINE_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}
