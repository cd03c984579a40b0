//! URL classification against the static allow-list (bounded, deterministic).
//!
//! `classify` is a pure function of `(path, config)`: no IO, no global
//! state, and it never panics on any input string.

use crate::SiteConfig;
use linkmend_core::{InvalidReason, Validation};

/// Decide whether `path` is a known destination.
///
/// Order matters and mirrors the redirect layer's checks:
/// 1. ignore rules (assets, infra routes) are always valid;
/// 2. allow-list membership, with optional `.html` appended or stripped;
/// 3. a non-page, non-asset extension is an extension mismatch;
/// 4. special cases (numeric segment, query-like suffix, overlong path);
/// 5. everything else is simply not in the allow-list.
pub fn classify(path: &str, cfg: &SiteConfig) -> Validation {
    if cfg.ignore_rules.iter().any(|r| r.matches(path)) {
        return Validation::Valid;
    }
    if in_allow_list(path, &cfg.valid_pages) {
        return Validation::Valid;
    }
    if has_mismatched_extension(path, cfg) {
        return invalid(InvalidReason::ExtensionMismatch);
    }
    if is_numeric_segment(path) {
        return invalid(InvalidReason::NumericSegment);
    }
    if has_query_suffix(path) {
        return invalid(InvalidReason::QuerySuffix);
    }
    if path.len() > cfg.max_path_len {
        return invalid(InvalidReason::TooLong);
    }
    invalid(InvalidReason::NotInAllowList)
}

fn invalid(reason: InvalidReason) -> Validation {
    Validation::Invalid {
        reason,
        attempted_fix: None,
    }
}

/// Membership with `.html` normalization in both directions.
pub fn in_allow_list(path: &str, valid_pages: &[String]) -> bool {
    if valid_pages.iter().any(|p| p == path) {
        return true;
    }
    let appended = format!("{path}.html");
    if valid_pages.iter().any(|p| *p == appended) {
        return true;
    }
    if let Some(stripped) = path.strip_suffix(".html") {
        if valid_pages.iter().any(|p| p == stripped) {
            return true;
        }
    }
    false
}

/// A dot-extension that is neither a page extension nor a static asset.
fn has_mismatched_extension(path: &str, cfg: &SiteConfig) -> bool {
    let Some(dot) = path.rfind('.') else {
        return false;
    };
    let ext = path[dot..].to_ascii_lowercase();
    if cfg.page_extensions.iter().any(|e| *e == ext) {
        // A page extension: the path may still be unknown, but the
        // extension itself is fine.
        return false;
    }
    !cfg.asset_extensions.iter().any(|e| *e == ext)
}

/// A single purely numeric segment, e.g. `/123`.
fn is_numeric_segment(path: &str) -> bool {
    match path.strip_prefix('/') {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// A `?` embedded after the first segment, e.g. `/page?x=1` leaking into
/// the path component.
fn has_query_suffix(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    match path.find('?') {
        Some(q) if q > 1 => !path[1..q].contains('/'),
        _ => false,
    }
}
