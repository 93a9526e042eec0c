use crate::normalize::{document_text, normalize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Sparse term -> non-negative weight mapping.
pub type TermVector = HashMap<String, f64>;

/// One problem statement as loaded from the corpus. Absent fields are
/// treated as empty strings. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// Judge platform, derived from a problem URL's host at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    LeetCode,
    Codeforces,
    Unknown,
}

impl Platform {
    /// Derive the platform from the URL's host suffix. Unparseable URLs
    /// and unrecognized hosts map to `Unknown`.
    pub fn from_url(url: &str) -> Self {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return Platform::Unknown,
        };
        let host = match parsed.host_str() {
            Some(h) => h,
            None => return Platform::Unknown,
        };
        if host == "leetcode.com" || host.ends_with(".leetcode.com") {
            Platform::LeetCode
        } else if host == "codeforces.com" || host.ends_with(".codeforces.com") {
            Platform::Codeforces
        } else {
            Platform::Unknown
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::LeetCode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// The immutable search index: problems plus one TF-IDF vector and one
/// Euclidean magnitude per problem, positionally correlated
/// (`doc_vectors[i]` and `doc_magnitudes[i]` describe `problems[i]`).
///
/// `doc_freq` holds explicit per-term document-presence counts and is the
/// single source of inverse document frequency for both build time and
/// query time. Never mutated after `build`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Index {
    pub problems: Vec<Problem>,
    pub doc_vectors: Vec<TermVector>,
    pub doc_magnitudes: Vec<f64>,
    pub doc_freq: HashMap<String, u32>,
    pub num_docs: u32,
}

impl Index {
    /// Build the index from an ordered corpus. Pure: the same corpus always
    /// yields identical vectors and magnitudes. An empty corpus yields a
    /// valid empty index.
    pub fn build(problems: Vec<Problem>) -> Index {
        let mut doc_counts: Vec<HashMap<String, u32>> = Vec::with_capacity(problems.len());
        let mut doc_freq: HashMap<String, u32> = HashMap::new();

        for problem in &problems {
            let tokens = normalize(&document_text(&problem.title, &problem.description));
            let mut counts: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
            // A term counts once per document containing it.
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            doc_counts.push(counts);
        }

        let num_docs = problems.len() as u32;
        let mut index = Index {
            problems,
            doc_vectors: Vec::with_capacity(doc_counts.len()),
            doc_magnitudes: Vec::with_capacity(doc_counts.len()),
            doc_freq,
            num_docs,
        };

        for counts in doc_counts {
            let mut vector = TermVector::with_capacity(counts.len());
            let mut sum_squares = 0.0f64;
            for (term, count) in counts {
                // Every term here came from a document, so df >= 1.
                let idf = index.idf(&term).unwrap_or(0.0);
                let weight = count as f64 * idf;
                sum_squares += weight * weight;
                vector.insert(term, weight);
            }
            index.doc_vectors.push(vector);
            index.doc_magnitudes.push(sum_squares.sqrt());
        }

        index
    }

    /// Canonical inverse document frequency: `ln(num_docs / doc_freq)`.
    /// Returns `None` for terms absent from the corpus. Terms present in
    /// every document yield exactly zero.
    pub fn idf(&self, term: &str) -> Option<f64> {
        let df = *self.doc_freq.get(term)?;
        Some((f64::from(self.num_docs) / f64::from(df)).ln())
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
