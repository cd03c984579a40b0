//! Display-level URL correction hints for the error page.
//!
//! Purely advisory string rewrites ("did you mean …?"); nothing here
//! navigates or consults the allow-list. First applicable rule wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCorrection {
    /// The slice of the URL that looked wrong.
    pub matched: String,
    /// What it was rewritten to.
    pub replacement: String,
    /// The whole URL with the rewrite applied.
    pub corrected_url: String,
}

/// Common mistakes seen in the wild: legacy server-page extensions,
/// misspelled index/home pages, doubled slashes, stray `www.`.
pub fn suggest_correction(url: &str) -> Option<UrlCorrection> {
    if let Some(c) = fix_legacy_extension(url) {
        return Some(c);
    }
    if let Some(c) = fix_entry_page(url, "index.") {
        return Some(c);
    }
    if let Some(c) = fix_entry_page(url, "home.") {
        return Some(c);
    }
    if let Some(pos) = url.find("///") {
        return Some(correction(url, pos, "///", "//"));
    }
    if let Some(pos) = url.find("www.") {
        return Some(correction(url, pos, "www.", ""));
    }
    None
}

/// `.php` / `.aspx` / `.jsp` suffixes become `.html`.
fn fix_legacy_extension(url: &str) -> Option<UrlCorrection> {
    let lower = url.to_ascii_lowercase();
    for ext in [".php", ".aspx", ".jsp"] {
        if lower.ends_with(ext) {
            let pos = url.len() - ext.len();
            return Some(correction(url, pos, &url[pos..], ".html"));
        }
    }
    None
}

/// A trailing `index.<letters>` (or `home.<letters>`) becomes `index.html`.
fn fix_entry_page(url: &str, stem: &str) -> Option<UrlCorrection> {
    let lower = url.to_ascii_lowercase();
    let pos = lower.rfind(stem)?;
    let ext = &lower[pos + stem.len()..];
    if ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if lower[pos + stem.len()..] == *"html" && stem == "index." {
        // Already canonical.
        return None;
    }
    Some(correction(url, pos, &url[pos..], "index.html"))
}

fn correction(url: &str, pos: usize, matched: &str, replacement: &str) -> UrlCorrection {
    let corrected_url = format!(
        "{}{}{}",
        &url[..pos],
        replacement,
        &url[pos + matched.len()..]
    );
    UrlCorrection {
        matched: matched.to_string(),
        replacement: replacement.to_string(),
        corrected_url,
    }
}
