//! Redirect URL planning (no navigation here, just the target strings).

use crate::SiteConfig;
use url::form_urlencoded;

/// Build the error-page URL for a broken load:
/// `<error_page>?from=<original>&t=<now_ms>` plus whichever whitelisted
/// tracking parameters are present on the current query string.
pub fn error_page_url(
    cfg: &SiteConfig,
    original_url: &str,
    current_query: &str,
    now_ms: u64,
) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    params.append_pair("from", original_url);
    params.append_pair("t", &now_ms.to_string());

    let query = current_query.strip_prefix('?').unwrap_or(current_query);
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        if cfg.allowed_params.iter().any(|p| *p == k) {
            params.append_pair(&k, &v);
        }
    }

    format!("{}?{}", cfg.error_page, params.finish())
}

/// Reattach the original query string and fragment to a corrected path.
pub fn fixed_url(fixed_path: &str, current_query: &str, fragment: &str) -> String {
    let mut out = String::from(fixed_path);
    let query = current_query.strip_prefix('?').unwrap_or(current_query);
    if !query.is_empty() {
        out.push('?');
        out.push_str(query);
    }
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if !fragment.is_empty() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_url_carries_from_and_timestamp() {
        let cfg = SiteConfig::default();
        let u = error_page_url(&cfg, "https://example.com/nope", "", 1234);
        assert_eq!(
            u,
            "/404.html?from=https%3A%2F%2Fexample.com%2Fnope&t=1234"
        );
    }

    #[test]
    fn only_whitelisted_params_survive() {
        let cfg = SiteConfig::default();
        let u = error_page_url(
            &cfg,
            "https://example.com/nope",
            "?utm_source=mail&session=abc&ref=rss",
            7,
        );
        assert!(u.contains("utm_source=mail"));
        assert!(u.contains("ref=rss"));
        assert!(!u.contains("session"));
    }

    #[test]
    fn fixed_url_keeps_query_and_fragment() {
        assert_eq!(fixed_url("/artigo.html", "", ""), "/artigo.html");
        assert_eq!(
            fixed_url("/artigo.html", "?ref=rss", "#topo"),
            "/artigo.html?ref=rss#topo"
        );
        // Leading separators are optional on input.
        assert_eq!(
            fixed_url("/artigo.html", "ref=rss", "topo"),
            "/artigo.html?ref=rss#topo"
        );
    }
}
