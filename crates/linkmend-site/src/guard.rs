//! Link guard: allow/deny decisions for navigation intents, decoupled from
//! any DOM click machinery.
//!
//! Failure-tolerant by contract: anything we cannot parse is allowed to
//! proceed rather than blocked.

use crate::{classify, redirect, SiteConfig};
use linkmend_core::{NavDecision, NavigationIntent};

/// Decide whether a link click may proceed.
///
/// - Fragment-only, `javascript:` and `mailto:` links are never touched.
/// - Unparseable hrefs and external origins are allowed through.
/// - An internal href whose path is not allow-listed is denied, with the
///   error-page URL to send the user to instead.
pub fn check_link(intent: &NavigationIntent, cfg: &SiteConfig, now_ms: u64) -> NavDecision {
    let href = intent.href.trim();
    if href.is_empty() || href.starts_with('#') {
        return NavDecision::Allow;
    }
    let href_lc = href.to_ascii_lowercase();
    if href_lc.starts_with("javascript:") || href_lc.starts_with("mailto:") {
        return NavDecision::Allow;
    }

    let Ok(base) = url::Url::parse(intent.page_origin.trim()) else {
        return NavDecision::Allow;
    };
    let abs = match url::Url::parse(href) {
        Ok(u) => u,
        Err(_) => match base.join(href) {
            Ok(u) => u,
            Err(_) => return NavDecision::Allow,
        },
    };
    if abs.origin() != base.origin() {
        return NavDecision::Allow;
    }

    if classify::in_allow_list(abs.path(), &cfg.valid_pages) {
        return NavDecision::Allow;
    }

    let query = abs.query().map(|q| q.to_string()).unwrap_or_default();
    NavDecision::Deny {
        redirect: redirect::error_page_url(cfg, abs.as_str(), &query, now_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture_config;

    fn intent(href: &str) -> NavigationIntent {
        NavigationIntent {
            href: href.to_string(),
            page_origin: "https://example.com".to_string(),
        }
    }

    #[test]
    fn inert_hrefs_are_allowed() {
        let cfg = fixture_config();
        for href in ["", "#topo", "javascript:void(0)", "mailto:oi@example.com"] {
            assert_eq!(check_link(&intent(href), &cfg, 0), NavDecision::Allow);
        }
    }

    #[test]
    fn external_links_are_allowed() {
        let cfg = fixture_config();
        assert_eq!(
            check_link(&intent("https://other.example.net/nope"), &cfg, 0),
            NavDecision::Allow
        );
    }

    #[test]
    fn internal_valid_links_are_allowed() {
        let cfg = fixture_config();
        for href in ["/artigo", "/artigo.html", "artigo.html", "https://example.com/suporte"] {
            assert_eq!(
                check_link(&intent(href), &cfg, 0),
                NavDecision::Allow,
                "href {href:?}"
            );
        }
    }

    #[test]
    fn internal_broken_links_are_denied_with_a_redirect() {
        let cfg = fixture_config();
        let decision = check_link(&intent("/quebrado"), &cfg, 42);
        let NavDecision::Deny { redirect } = decision else {
            panic!("expected deny");
        };
        assert!(redirect.starts_with("/404.html?from="));
        assert!(redirect.contains("t=42"));
    }

    #[test]
    fn unparseable_origin_or_href_is_allowed_through() {
        let mut cfg = fixture_config();
        cfg.valid_pages.clear();
        let nav = NavigationIntent {
            href: "/qualquer".to_string(),
            page_origin: "not a url".to_string(),
        };
        assert_eq!(check_link(&nav, &cfg, 0), NavDecision::Allow);
    }
}
