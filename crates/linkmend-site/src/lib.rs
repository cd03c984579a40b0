//! Static-site implementations for `linkmend`.
//!
//! Everything in this crate is:
//! - **offline**: no network calls
//! - **bounded**: fixed allow-lists and catalogs, single-pass scans
//! - **deterministic**: same inputs, same outputs
//!
//! [`Engine`] evaluates one external event at a time (a page load, a link
//! click, a search submission) against an immutable [`SiteConfig`] and a
//! fixed page catalog. Nothing here mutates shared state between calls.

use linkmend_core::{
    Error, ErrorRecord, NavDecision, NavigationIntent, PageDescriptor, RedirectTarget, Result,
    SearchHit, Validation,
};
use serde::{Deserialize, Serialize};

pub mod autofix;
pub mod classify;
pub mod corrections;
pub mod guard;
pub mod history;
pub mod ranker;
pub mod redirect;
pub mod schedule;
pub mod suggest;

fn env_trimmed(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    env_trimmed(key).map(|v| {
        matches!(
            v.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_trimmed(key).and_then(|v| v.parse::<u64>().ok())
}

fn env_csv(key: &str) -> Vec<String> {
    std::env::var(key)
        .ok()
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A rule matching paths that must never be flagged as broken
/// (static assets and known infra routes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreRule {
    /// File extensions (with leading dot), compared case-insensitively.
    Extensions(Vec<String>),
    /// Path prefix, e.g. `/api/`.
    PathPrefix(String),
    /// Whole-path match, case-insensitive, e.g. `/robots.txt`.
    ExactPath(String),
}

impl IgnoreRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            IgnoreRule::Extensions(exts) => {
                let lower = path.to_ascii_lowercase();
                exts.iter().any(|e| lower.ends_with(e.as_str()))
            }
            IgnoreRule::PathPrefix(prefix) => path.starts_with(prefix.as_str()),
            IgnoreRule::ExactPath(p) => path.eq_ignore_ascii_case(p),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Immutable per-site configuration, passed into [`Engine`] at construction.
///
/// No global state: two engines with different configs can evaluate in
/// parallel without interference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Static allow-list of paths considered valid destinations.
    pub valid_pages: Vec<String>,
    /// Extensions that denote a page (as opposed to an asset).
    pub page_extensions: Vec<String>,
    /// Extensions that denote a static asset for the extension-mismatch
    /// check. Wider than the ignore-rule asset set: also covers media.
    pub asset_extensions: Vec<String>,
    /// Tracking parameters preserved on the error-page redirect.
    pub allowed_params: Vec<String>,
    pub ignore_rules: Vec<IgnoreRule>,
    /// Path of the dedicated error page.
    pub error_page: String,
    /// When false, classification still runs but no redirect is scheduled.
    pub auto_redirect: bool,
    /// When false, the auto-fix heuristic is skipped entirely.
    pub auto_fix: bool,
    pub redirect_delay_ms: u64,
    pub error_history_size: usize,
    pub search_history_size: usize,
    /// Search results shown to the user (ranked list is truncated to this).
    pub max_results: usize,
    /// Paths longer than this are treated as invalid.
    pub max_path_len: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            valid_pages: strings(&["/", "/index.html", "/index", "/404.html", "/404"]),
            page_extensions: strings(&[".html", ".htm", ".php", ".asp", ".aspx", ".jsp"]),
            asset_extensions: strings(&[
                ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff",
                ".woff2", ".ttf", ".eot", ".mp4", ".webm", ".mp3",
            ]),
            allowed_params: strings(&[
                "ref",
                "utm_source",
                "utm_medium",
                "utm_campaign",
                "fbclid",
            ]),
            ignore_rules: vec![
                IgnoreRule::Extensions(strings(&[
                    ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff",
                    ".woff2", ".ttf", ".eot",
                ])),
                IgnoreRule::PathPrefix("/api/".to_string()),
                IgnoreRule::PathPrefix("/admin/".to_string()),
                IgnoreRule::PathPrefix("/wp-admin/".to_string()),
                IgnoreRule::PathPrefix("/wp-content/".to_string()),
                IgnoreRule::PathPrefix("/wp-includes/".to_string()),
                IgnoreRule::ExactPath("/robots.txt".to_string()),
                IgnoreRule::ExactPath("/sitemap.xml".to_string()),
                IgnoreRule::ExactPath("/favicon.ico".to_string()),
                IgnoreRule::ExactPath("/manifest.json".to_string()),
            ],
            error_page: "/404.html".to_string(),
            auto_redirect: true,
            auto_fix: true,
            redirect_delay_ms: 100,
            error_history_size: 50,
            search_history_size: 10,
            max_results: 3,
            max_path_len: 100,
        }
    }
}

impl SiteConfig {
    /// Apply `LINKMEND_*` environment overrides on top of `self`.
    ///
    /// Empty or unparsable values behave the same as "unset".
    pub fn from_env(mut self) -> Self {
        if let Some(p) = env_trimmed("LINKMEND_ERROR_PAGE") {
            self.error_page = p;
        }
        if let Some(ms) = env_u64("LINKMEND_REDIRECT_DELAY_MS") {
            self.redirect_delay_ms = ms;
        }
        if let Some(b) = env_bool("LINKMEND_AUTO_REDIRECT") {
            self.auto_redirect = b;
        }
        if let Some(b) = env_bool("LINKMEND_AUTO_FIX") {
            self.auto_fix = b;
        }
        for p in env_csv("LINKMEND_VALID_PAGES") {
            if !self.valid_pages.contains(&p) {
                self.valid_pages.push(p);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.error_page.starts_with('/') {
            return Err(Error::Config(format!(
                "error_page must be an absolute path, got {:?}",
                self.error_page
            )));
        }
        if self.max_results == 0 {
            return Err(Error::Config("max_results must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Navigation state of the page being evaluated, as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Path component, e.g. `/artigo.html`.
    pub path: String,
    /// Raw query string, with or without the leading `?`.
    pub query: String,
    /// Raw fragment, with or without the leading `#`.
    pub fragment: String,
    /// Full original URL, used for the error page's `from` parameter.
    pub href: String,
    pub referrer: String,
}

/// What a page-load evaluation decided.
#[derive(Debug, Clone)]
pub enum PageLoadOutcome {
    /// Already on the error page; nothing to do.
    AlreadyOnErrorPage,
    Valid,
    /// Classification result with `auto_redirect` disabled: report only.
    Observed(Validation),
    /// Invalid path; a redirect has been scheduled (at most one per load).
    Redirect {
        validation: Validation,
        pending: schedule::PendingRedirect,
    },
}

/// Ranked search results plus flat warnings, in the shape callers render.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: Vec<SearchHit>,
    pub warnings: Vec<&'static str>,
}

/// The stateless-per-call evaluation engine: URL classification with
/// auto-fix, redirect planning, link guarding, and catalog search.
#[derive(Debug, Clone)]
pub struct Engine {
    cfg: SiteConfig,
    catalog: Vec<PageDescriptor>,
}

impl Engine {
    pub fn new(cfg: SiteConfig, catalog: Vec<PageDescriptor>) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg, catalog })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.cfg
    }

    pub fn catalog(&self) -> &[PageDescriptor] {
        &self.catalog
    }

    /// Evaluate one page load. Never fails: any input string produces a
    /// defined outcome, and at most one redirect is scheduled.
    pub fn evaluate(&self, ctx: &PageContext, now_ms: u64) -> PageLoadOutcome {
        // The error page itself hosts this layer too; don't loop.
        if ctx.path.contains("404") {
            return PageLoadOutcome::AlreadyOnErrorPage;
        }

        match classify::classify(&ctx.path, &self.cfg) {
            Validation::Valid => PageLoadOutcome::Valid,
            Validation::Invalid { reason, .. } => {
                let fix = if self.cfg.auto_fix {
                    autofix::try_fix(&ctx.path, &self.cfg.valid_pages)
                } else {
                    None
                };
                let validation = Validation::Invalid {
                    reason,
                    attempted_fix: fix.clone(),
                };
                if !self.cfg.auto_redirect {
                    return PageLoadOutcome::Observed(validation);
                }
                let target = match fix {
                    Some(path) => RedirectTarget::Fixed(redirect::fixed_url(
                        &path,
                        &ctx.query,
                        &ctx.fragment,
                    )),
                    None => RedirectTarget::ErrorPage(redirect::error_page_url(
                        &self.cfg, &ctx.href, &ctx.query, now_ms,
                    )),
                };
                PageLoadOutcome::Redirect {
                    validation,
                    pending: schedule::PendingRedirect::new(
                        target,
                        now_ms + self.cfg.redirect_delay_ms,
                    ),
                }
            }
        }
    }

    /// Keyword search over the catalog, truncated to `max_results`.
    ///
    /// An empty query or an empty result set is a defined outcome, not an
    /// error; both are surfaced as warnings.
    pub fn search(&self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome {
                results: Vec::new(),
                warnings: vec!["query_empty"],
            };
        }
        let mut results = ranker::rank(query, &self.catalog);
        results.truncate(self.cfg.max_results);
        let mut warnings = Vec::new();
        if results.is_empty() {
            warnings.push("no_results");
        }
        SearchOutcome { results, warnings }
    }

    /// Allow/deny decision for a navigation intent (link click).
    pub fn check_link(&self, intent: &NavigationIntent, now_ms: u64) -> NavDecision {
        guard::check_link(intent, &self.cfg, now_ms)
    }

    /// Build the history record for a broken page load.
    pub fn error_record(&self, ctx: &PageContext, now_ms: u64) -> ErrorRecord {
        ErrorRecord {
            url: ctx.href.clone(),
            path: ctx.path.clone(),
            query: ctx.query.clone(),
            referrer: ctx.referrer.clone(),
            at_epoch_ms: now_ms,
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture_catalog() -> Vec<PageDescriptor> {
    fn page(title: &str, url: &str, icon: &str, keywords: &[&str], description: &str) -> PageDescriptor {
        PageDescriptor {
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            description: description.to_string(),
        }
    }
    vec![
        page(
            "Página Principal",
            "index.html",
            "fas fa-home",
            &["inicio", "principal", "home", "começo"],
            "Volte para a página principal do site",
        ),
        page(
            "Enciclopédia/Artigo",
            "artigo.html",
            "fas fa-book-open",
            &["artigo", "enciclopedia", "wiki", "história", "aprender"],
            "Leia nosso artigo completo",
        ),
        page(
            "Biblioteca de Artigos",
            "biblioteca.html",
            "fas fa-book",
            &["biblioteca", "artigos", "tutoriais", "guias", "tutorial"],
            "Acesse todos os tutoriais e guias",
        ),
        page(
            "Central de Suporte",
            "suporte.html",
            "fas fa-life-ring",
            &["suporte", "ajuda", "faq", "problema", "contato"],
            "Encontre ajuda e respostas para suas dúvidas",
        ),
        page(
            "Navegação do Site",
            "navegacao.html",
            "fas fa-sitemap",
            &["navegação", "mapa", "páginas", "explorar", "menu"],
            "Veja todas as páginas disponíveis em um só lugar",
        ),
    ]
}

#[cfg(test)]
pub(crate) fn fixture_config() -> SiteConfig {
    let mut cfg = SiteConfig::default();
    for p in [
        "/artigo.html",
        "/artigo",
        "/biblioteca.html",
        "/biblioteca",
        "/suporte.html",
        "/suporte",
        "/navegacao.html",
        "/navegacao",
    ] {
        cfg.valid_pages.push(p.to_string());
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmend_core::InvalidReason;
    use std::sync::Mutex;

    // Env vars are process-global; serialize tests that mutate them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        k: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(k: &'static str, v: &str) -> Self {
            let prev = std::env::var(k).ok();
            std::env::set_var(k, v);
            Self { k, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(v) = self.prev.take() {
                std::env::set_var(self.k, v);
            } else {
                std::env::remove_var(self.k);
            }
        }
    }

    fn engine() -> Engine {
        Engine::new(fixture_config(), fixture_catalog()).unwrap()
    }

    fn ctx(path: &str) -> PageContext {
        PageContext {
            path: path.to_string(),
            query: String::new(),
            fragment: String::new(),
            href: format!("https://example.com{path}"),
            referrer: String::new(),
        }
    }

    #[test]
    fn valid_page_load_proceeds() {
        assert!(matches!(
            engine().evaluate(&ctx("/artigo"), 0),
            PageLoadOutcome::Valid
        ));
    }

    #[test]
    fn error_page_itself_is_left_alone() {
        assert!(matches!(
            engine().evaluate(&ctx("/404.html"), 0),
            PageLoadOutcome::AlreadyOnErrorPage
        ));
    }

    #[test]
    fn invalid_page_schedules_exactly_one_redirect_after_delay() {
        let out = engine().evaluate(&ctx("/nope"), 1_000);
        let PageLoadOutcome::Redirect { validation, pending } = out else {
            panic!("expected a redirect");
        };
        assert!(!validation.is_valid());
        // Not due yet at evaluation time, due once the delay elapses.
        assert!(pending.poll(1_000).is_none());
        let target = pending.poll(1_100).expect("due after delay");
        assert!(matches!(target, RedirectTarget::ErrorPage(_)));
    }

    #[test]
    fn fixable_page_redirects_to_fix_not_error_page() {
        let out = engine().evaluate(&ctx("/Suporte"), 0);
        let PageLoadOutcome::Redirect { validation, pending } = out else {
            panic!("expected a redirect");
        };
        let Validation::Invalid { attempted_fix, .. } = validation else {
            panic!("expected invalid");
        };
        assert_eq!(attempted_fix.as_deref(), Some("/suporte"));
        assert_eq!(
            pending.poll(100).unwrap(),
            &RedirectTarget::Fixed("/suporte".to_string())
        );
    }

    #[test]
    fn auto_redirect_off_reports_without_scheduling() {
        let mut cfg = fixture_config();
        cfg.auto_redirect = false;
        let eng = Engine::new(cfg, fixture_catalog()).unwrap();
        let out = eng.evaluate(&ctx("/nope"), 0);
        let PageLoadOutcome::Observed(validation) = out else {
            panic!("expected observation only");
        };
        assert_eq!(
            validation,
            Validation::Invalid {
                reason: InvalidReason::NotInAllowList,
                attempted_fix: None
            }
        );
    }

    #[test]
    fn search_is_capped_and_warns_on_empty_query() {
        let eng = engine();
        let out = eng.search("   ");
        assert!(out.results.is_empty());
        assert_eq!(out.warnings, vec!["query_empty"]);

        let out = eng.search("artigos tutoriais biblioteca paginas");
        assert!(out.results.len() <= eng.config().max_results);
    }

    #[test]
    fn config_env_overrides_apply_and_garbage_is_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _g1 = EnvGuard::set("LINKMEND_ERROR_PAGE", "/oops.html");
        let _g2 = EnvGuard::set("LINKMEND_REDIRECT_DELAY_MS", "250");
        let _g3 = EnvGuard::set("LINKMEND_AUTO_FIX", "off");
        let _g4 = EnvGuard::set("LINKMEND_VALID_PAGES", "/a.html, /b.html,,/a.html");
        let cfg = SiteConfig::default().from_env();
        assert_eq!(cfg.error_page, "/oops.html");
        assert_eq!(cfg.redirect_delay_ms, 250);
        assert!(!cfg.auto_fix);
        assert!(cfg.valid_pages.contains(&"/a.html".to_string()));
        assert!(cfg.valid_pages.contains(&"/b.html".to_string()));

        let _g5 = EnvGuard::set("LINKMEND_REDIRECT_DELAY_MS", "soon");
        let cfg = SiteConfig::default().from_env();
        assert_eq!(cfg.redirect_delay_ms, 100);
    }

    #[test]
    fn config_validation_rejects_relative_error_page() {
        let mut cfg = SiteConfig::default();
        cfg.error_page = "404.html".to_string();
        assert!(Engine::new(cfg, Vec::new()).is_err());
    }
}
