//! Search-box autocomplete: history first, then catalog keywords.

use linkmend_core::PageDescriptor;

const MIN_INPUT_CHARS: usize = 2;
const MAX_SUGGESTIONS: usize = 5;

/// Up to five suggestions for a partial input: matching history entries
/// first, then matching catalog keywords, deduped, in that order.
pub fn suggestions(input: &str, history: &[String], catalog: &[PageDescriptor]) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.chars().count() < MIN_INPUT_CHARS {
        return Vec::new();
    }

    let mut out: Vec<String> = history
        .iter()
        .filter(|h| h.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect();

    for page in catalog {
        for keyword in &page.keywords {
            if out.len() >= MAX_SUGGESTIONS {
                return out;
            }
            if keyword.to_lowercase().contains(&needle)
                && !out.iter().any(|s| s.eq_ignore_ascii_case(keyword))
            {
                out.push(keyword.clone());
            }
        }
    }
    out
}

/// Byte range of the first case-insensitive occurrence of `needle` in
/// `text`, for caller-side highlighting. ASCII case folding only, so the
/// returned span always lies on character boundaries of `text`.
pub fn match_span(text: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let start = text
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())?;
    Some((start, start + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture_catalog;

    #[test]
    fn short_input_yields_nothing() {
        let history = vec!["suporte".to_string()];
        assert!(suggestions("s", &history, &fixture_catalog()).is_empty());
        assert!(suggestions(" ", &history, &fixture_catalog()).is_empty());
    }

    #[test]
    fn history_comes_before_catalog_keywords() {
        let history = vec!["tutorial avançado".to_string()];
        let out = suggestions("tutor", &history, &fixture_catalog());
        assert_eq!(out.first().map(String::as_str), Some("tutorial avançado"));
        // Catalog keywords fill the remainder.
        assert!(out.iter().any(|s| s == "tutoriais" || s == "tutorial"));
        assert!(out.len() <= 5);
    }

    #[test]
    fn duplicate_keywords_are_not_repeated() {
        let history = vec!["suporte".to_string()];
        let out = suggestions("suporte", &history, &fixture_catalog());
        assert_eq!(
            out.iter().filter(|s| s.eq_ignore_ascii_case("suporte")).count(),
            1
        );
    }

    #[test]
    fn match_span_is_case_insensitive_and_byte_indexed() {
        assert_eq!(match_span("Central de Suporte", "suporte"), Some((11, 18)));
        assert_eq!(match_span("Central de Suporte", "xyz"), None);
        assert_eq!(match_span("abc", ""), None);
    }
}
