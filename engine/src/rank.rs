use crate::index::{Index, Platform, TermVector};
use serde::Serialize;
use std::cmp::Ordering;

/// Result ordering. `Relevance` ranks by cosine score with corpus-order
/// tie-breaking; the title modes re-sort the whole filtered list by title
/// and discard relevance order entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Relevance,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    /// Parse a request parameter. Unknown or missing values fall back to
    /// relevance ordering.
    pub fn parse(value: Option<&str>) -> SortOrder {
        match value {
            Some("title_asc") => SortOrder::TitleAsc,
            Some("title_desc") => SortOrder::TitleDesc,
            _ => SortOrder::Relevance,
        }
    }
}

/// A matched problem enriched with its derived platform and cosine score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
    pub platform: Platform,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub per_page: usize,
    pub total_results: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct Page {
    pub results: Vec<SearchResult>,
    pub pagination: Pagination,
}

/// Score every document against the query vector, filter non-matches,
/// sort, and paginate.
///
/// `page` and `per_page` are clamped to a minimum of 1. Requesting a page
/// past the end yields an empty result slice, not an error.
pub fn search(
    index: &Index,
    query_vector: &TermVector,
    query_magnitude: f64,
    sort: SortOrder,
    page: usize,
    per_page: usize,
) -> Page {
    let page = page.max(1);
    let per_page = per_page.max(1);

    // Iterate the (small) query vector per document, not the document
    // vector.
    let mut matches: Vec<(usize, f64)> = Vec::new();
    for (idx, vector) in index.doc_vectors.iter().enumerate() {
        let mut dot = 0.0f64;
        for (term, query_weight) in query_vector {
            if let Some(doc_weight) = vector.get(term) {
                dot += query_weight * doc_weight;
            }
        }
        let doc_magnitude = index.doc_magnitudes[idx].max(1.0);
        let score = dot / (query_magnitude * doc_magnitude);
        if score > 0.0 {
            matches.push((idx, score));
        }
    }

    // Stable: equal scores keep corpus order.
    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut results: Vec<SearchResult> = matches
        .into_iter()
        .map(|(idx, score)| {
            let problem = &index.problems[idx];
            SearchResult {
                title: problem.title.clone(),
                description: problem.description.clone(),
                url: problem.url.clone(),
                platform: Platform::from_url(&problem.url),
                score,
            }
        })
        .collect();

    match sort {
        SortOrder::Relevance => {}
        SortOrder::TitleAsc => {
            results.sort_by(|a, b| compare_titles(&a.title, &b.title));
        }
        SortOrder::TitleDesc => {
            results.sort_by(|a, b| compare_titles(&b.title, &a.title));
        }
    }

    let total_results = results.len();
    let total_pages = total_results.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);
    let results: Vec<SearchResult> = results.into_iter().skip(start).take(per_page).collect();

    Page {
        results,
        pagination: Pagination {
            current_page: page,
            per_page,
            total_results,
            total_pages,
        },
    }
}

// Case-insensitive lexicographic order, with case as a deterministic
// fallback for otherwise-equal titles.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
