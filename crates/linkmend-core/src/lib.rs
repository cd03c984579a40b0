use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("history store error: {0}")]
    History(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One entry of the site catalog searched by the ranker.
///
/// Immutable once constructed; catalog order is the display tie-break order
/// for equal-relevance results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub title: String,
    pub url: String,
    /// Opaque icon identifier; the library never interprets it.
    pub icon: String,
    pub keywords: Vec<String>,
    pub description: String,
}

/// Why the classifier rejected a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// Not a member of the allow-list (the default fall-through).
    NotInAllowList,
    /// Has an extension that is neither a page extension nor a static asset.
    ExtensionMismatch,
    /// A purely numeric single segment, e.g. `/123`.
    NumericSegment,
    /// A query-like `?` embedded in the first path segment.
    QuerySuffix,
    /// Path exceeds the configured length threshold.
    TooLong,
}

/// Outcome of classifying the current browser path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validation {
    Valid,
    Invalid {
        reason: InvalidReason,
        /// A corrected path when the auto-fix heuristic found one.
        attempted_fix: Option<String>,
    },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// How a search hit matched the query, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// Page title contains the full query.
    Title,
    /// A keyword equals the query exactly.
    ExactKeyword,
    /// The query contains a keyword.
    Keyword,
    /// Word-level or description overlap only.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub page: PageDescriptor,
    /// Additive relevance score; higher is more relevant.
    pub relevance: u32,
    pub match_type: MatchType,
}

/// A navigation the hosting page is about to perform (e.g. a link click),
/// decoupled from any DOM event machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    /// Raw href as written in the document (may be relative).
    pub href: String,
    /// Origin of the current page, used to resolve relative hrefs and to
    /// tell internal links from external ones.
    pub page_origin: String,
}

/// Allow the navigation, or deny it and send the user somewhere safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavDecision {
    Allow,
    Deny { redirect: String },
}

/// Where a scheduled redirect will take the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectTarget {
    /// An automatically corrected version of the requested path.
    Fixed(String),
    /// The error page, with diagnostic query parameters attached.
    ErrorPage(String),
}

impl RedirectTarget {
    pub fn url(&self) -> &str {
        match self {
            RedirectTarget::Fixed(u) => u,
            RedirectTarget::ErrorPage(u) => u,
        }
    }
}

/// One recorded broken-link event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub url: String,
    pub path: String,
    pub query: String,
    pub referrer: String,
    pub at_epoch_ms: u64,
}

/// A small, bounded, ordered external store for history lists.
/// Implementations must treat a missing or malformed backing store as
/// empty rather than failing reads.
pub trait BoundedLog<T>: Send + Sync {
    fn get(&self) -> Result<Vec<T>>;
    /// Replace the whole list. The primitive the bounded helpers build on.
    fn put(&self, items: Vec<T>) -> Result<()>;

    fn clear(&self) -> Result<()> {
        self.put(Vec::new())
    }

    /// Prepend `item` and drop everything past `cap`.
    fn push_front_bounded(&self, item: T, cap: usize) -> Result<()> {
        let mut items = self.get()?;
        items.insert(0, item);
        items.truncate(cap);
        self.put(items)
    }
}
