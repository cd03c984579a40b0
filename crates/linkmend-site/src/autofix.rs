//! Auto-fix heuristic: deterministic single-step rewrites of a broken path.
//!
//! Every rule is tested against the ORIGINAL path, never against another
//! rule's output; the first rule whose rewrite lands in the allow-list
//! wins. Composite errors (say, a trailing slash AND a missing extension)
//! are deliberately not fixed.

/// Try the ordered rewrite rules; `Some(fixed)` on the first allow-list hit.
pub fn try_fix(path: &str, valid_pages: &[String]) -> Option<String> {
    for rule in [
        strip_trailing_slash,
        append_html,
        collapse_double_html,
        lowercase_all,
        strip_numeric_suffix,
    ] {
        if let Some(candidate) = rule(path) {
            if is_allowed(&candidate, valid_pages) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Allow-list membership, directly or with a trailing `.html` stripped.
fn is_allowed(candidate: &str, valid_pages: &[String]) -> bool {
    if valid_pages.iter().any(|p| p == candidate) {
        return true;
    }
    if let Some(stripped) = candidate.strip_suffix(".html") {
        if valid_pages.iter().any(|p| p == stripped) {
            return true;
        }
    }
    false
}

fn strip_trailing_slash(path: &str) -> Option<String> {
    path.strip_suffix('/').map(|p| p.to_string())
}

/// Append `.html` when the path has no dot at all.
fn append_html(path: &str) -> Option<String> {
    if path.starts_with('/') && path.len() > 1 && !path.contains('.') {
        Some(format!("{path}.html"))
    } else {
        None
    }
}

fn collapse_double_html(path: &str) -> Option<String> {
    path.strip_suffix(".html.html")
        .map(|stem| format!("{stem}.html"))
}

fn lowercase_all(path: &str) -> Option<String> {
    if path.chars().any(|c| c.is_uppercase()) {
        Some(path.to_lowercase())
    } else {
        None
    }
}

/// Strip a trailing `-<digits>` suffix, e.g. `/artigo-2` -> `/artigo`.
fn strip_numeric_suffix(path: &str) -> Option<String> {
    let stem = path.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.len() == path.len() {
        return None;
    }
    stem.strip_suffix('-').map(|p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<String> {
        ["/", "/index.html", "/index", "/artigo.html", "/artigo", "/suporte.html"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn trailing_slash_is_stripped_first() {
        // Rule order is pinned: the slash rule runs before anything else
        // and its output is checked against the original allow-list.
        assert_eq!(try_fix("/artigo/", &pages()).as_deref(), Some("/artigo"));
    }

    #[test]
    fn missing_extension_is_appended() {
        assert_eq!(
            try_fix("/suporte", &pages()).as_deref(),
            Some("/suporte.html")
        );
    }

    #[test]
    fn doubled_html_extension_is_collapsed() {
        let pages = vec!["/downloads.html".to_string()];
        assert_eq!(
            try_fix("/downloads.html.html", &pages).as_deref(),
            Some("/downloads.html")
        );
    }

    #[test]
    fn uppercase_path_is_lowercased() {
        assert_eq!(try_fix("/ARTIGO.html", &pages()).as_deref(), Some("/artigo.html"));
        // The append-html rule fires first for extensionless paths but its
        // candidate misses; lowercasing then lands.
        assert_eq!(try_fix("/Artigo", &pages()).as_deref(), Some("/artigo"));
    }

    #[test]
    fn trailing_numeric_suffix_is_stripped() {
        assert_eq!(try_fix("/artigo-2", &pages()).as_deref(), Some("/artigo"));
        assert_eq!(try_fix("/artigo-123", &pages()).as_deref(), Some("/artigo"));
        // Digits without the hyphen are not this rule.
        assert_eq!(try_fix("/artigo2", &pages()), None);
    }

    #[test]
    fn rules_never_chain_on_composite_errors() {
        // Trailing slash AND missing `.html` together: the slash rule
        // produces `/suporte`, which is not listed as-is, and no single
        // remaining rule bridges both defects.
        let pages = vec!["/suporte.html".to_string()];
        assert_eq!(try_fix("/suporte/", &pages), None);
    }

    #[test]
    fn unfixable_paths_return_none() {
        assert_eq!(try_fix("/totally-unknown", &pages()), None);
        assert_eq!(try_fix("", &pages()), None);
        assert_eq!(try_fix("/", &pages()), None);
    }
}
