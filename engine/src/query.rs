use crate::index::{Index, TermVector};
use crate::normalize::normalize;
use std::collections::HashMap;

/// Build the transient query vector and its magnitude.
///
/// Query term frequency is length-normalized (`count / total_tokens`),
/// unlike document TF which uses raw counts; the asymmetry is part of the
/// weighting convention. IDF comes from the index's canonical
/// document-frequency counts; terms that are absent from the corpus or
/// present in every document (idf <= 0) carry no discriminative power and
/// are dropped. An empty vector gets magnitude 1 so downstream cosine
/// division is always defined (all documents then score zero).
pub fn vectorize(raw_query: &str, index: &Index) -> (TermVector, f64) {
    let tokens = normalize(raw_query);
    let total_tokens = tokens.len();

    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut vector = TermVector::new();
    let mut sum_squares = 0.0f64;
    for (term, count) in counts {
        let idf = match index.idf(&term) {
            Some(v) => v,
            None => continue,
        };
        if !idf.is_finite() || idf <= 0.0 {
            continue;
        }
        let tf = f64::from(count) / total_tokens as f64;
        let weight = tf * idf;
        sum_squares += weight * weight;
        vector.insert(term, weight);
    }

    let magnitude = sum_squares.sqrt();
    let magnitude = if magnitude == 0.0 { 1.0 } else { magnitude };
    (vector, magnitude)
}
