//! Parsing of `["original", "translation"]` lines from model output.

use regex::Regex;
use std::sync::LazyLock;

use super::types::SentencePair;

// Each group is a run of non-quote characters or backslash escapes, so a
// group can never swallow a bare `"` from a neighbouring element.
// unwrap is safe: pattern is a compile-time constant
#[allow(clippy::unwrap_used)]
static PAIR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\[\s*"((?:[^"\\]|\\.)*)"\s*,\s*"((?:[^"\\]|\\.)*)"\s*\]\s*,?\s*$"#).unwrap()
});

/// Parses one line of model output into a sentence pair.
///
/// Strict JSON decoding is tried first. If the model produced something that
/// is not valid JSON but still has the `[ "…" , "…" ]` shape (stray escapes,
/// a trailing comma), the two quoted groups are taken as-is with `\"`
/// unescaped. Returns `None` when neither works; callers skip such lines.
pub fn parse_pair(line: &str) -> Option<SentencePair> {
    let line = line.trim();
    let candidate = line.strip_suffix(',').unwrap_or(line).trim_end();

    if let Ok(pair) = serde_json::from_str::<SentencePair>(candidate) {
        return Some(pair);
    }

    let captures = PAIR_PATTERN.captures(line)?;
    Some(SentencePair::new(
        unescape_quotes(&captures[1]),
        unescape_quotes(&captures[2]),
    ))
}

fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"")
}
