//! Keyword search ranking over the fixed page catalog.
//!
//! Single pass over the catalog, additive scoring, stable ordering:
//! equal-relevance pages keep their catalog order.

use linkmend_core::{MatchType, PageDescriptor, SearchHit};

const TITLE_WEIGHT: u32 = 100;
const KEYWORD_IN_QUERY_WEIGHT: u32 = 50;
const WORD_IN_KEYWORD_WEIGHT: u32 = 10;
const DESCRIPTION_WEIGHT: u32 = 20;

/// Rank `catalog` against a free-text query, best first.
///
/// Zero-relevance pages are dropped; an empty query yields an empty list.
pub fn rank(query: &str, catalog: &[PageDescriptor]) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut hits = Vec::new();
    for page in catalog {
        let mut relevance = 0u32;

        if page.title.to_lowercase().contains(&query) {
            relevance += TITLE_WEIGHT;
        }
        for keyword in &page.keywords {
            let keyword = keyword.to_lowercase();
            if query.contains(&keyword) {
                relevance += KEYWORD_IN_QUERY_WEIGHT;
            }
            for word in &words {
                if keyword.contains(word) {
                    relevance += WORD_IN_KEYWORD_WEIGHT;
                }
            }
        }
        if page.description.to_lowercase().contains(&query) {
            relevance += DESCRIPTION_WEIGHT;
        }

        if relevance > 0 {
            hits.push(SearchHit {
                page: page.clone(),
                relevance,
                match_type: match_type(&query, page),
            });
        }
    }

    // Stable: ties keep catalog insertion order.
    hits.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    hits
}

/// Strongest applicable match category, by fixed precedence.
fn match_type(query: &str, page: &PageDescriptor) -> MatchType {
    if page.title.to_lowercase().contains(query) {
        return MatchType::Title;
    }
    if page.keywords.iter().any(|k| k.to_lowercase() == query) {
        return MatchType::ExactKeyword;
    }
    if page
        .keywords
        .iter()
        .any(|k| query.contains(&k.to_lowercase()))
    {
        return MatchType::Keyword;
    }
    MatchType::Partial
}
