use std::fmt;

/// Longest key kept; longer sanitized URLs are truncated.
pub const MAX_KEY_LEN: usize = 255;

/// Filesystem-safe cache key derived from an article URL.
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_` and the result is cut
/// to [`MAX_KEY_LEN`] characters. URLs that only differ after the cut, or
/// only in characters that map to `_`, share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleKey(String);

impl ArticleKey {
    pub fn for_url(url: &str) -> Self {
        let key: String = url
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_KEY_LEN)
            .collect();

        if key.is_empty() {
            Self("_".to_string())
        } else {
            Self(key)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sanitizes_url() {
        let key = ArticleKey::for_url("https://news.kbs.co.kr/news/pc/view/view.do?ncd=8140353");
        assert_eq!(
            key.as_str(),
            "https___news_kbs_co_kr_news_pc_view_view_do_ncd_8140353"
        );
    }

    #[test]
    fn test_key_keeps_safe_characters() {
        assert_eq!(ArticleKey::for_url("abc-XYZ_019").as_str(), "abc-XYZ_019");
    }

    #[test]
    fn test_key_replaces_non_ascii_per_character() {
        assert_eq!(ArticleKey::for_url("https://ja.x/記事").as_str(), "https___ja_x___");
    }

    #[test]
    fn test_key_is_deterministic() {
        let url = "https://elpais.com/deportes/2024/ciclismo.html";
        assert_eq!(ArticleKey::for_url(url), ArticleKey::for_url(url));
    }

    #[test]
    fn test_key_distinct_urls_distinct_keys() {
        let a = ArticleKey::for_url("https://example.com/a-1");
        let b = ArticleKey::for_url("https://example.com/a-2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_truncated() {
        let url = format!("https://example.com/{}", "x".repeat(500));
        let key = ArticleKey::for_url(&url);
        assert_eq!(key.as_str().len(), MAX_KEY_LEN);
        assert!(key.as_str().starts_with("https___example_com_x"));
    }

    #[test]
    fn test_key_truncation_collision() {
        let base = format!("https://example.com/{}", "x".repeat(300));
        let a = ArticleKey::for_url(&format!("{base}/one"));
        let b = ArticleKey::for_url(&format!("{base}/two"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_only_safe_characters() {
        let key = ArticleKey::for_url("ftp://a b/c?d=e&f#g%20ü");
        assert!(
            key.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        );
    }

    #[test]
    fn test_key_for_empty_url() {
        assert_eq!(ArticleKey::for_url("").as_str(), "_");
    }
}
