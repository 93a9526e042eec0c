use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref STRIP: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","also","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "just","me","more","most","my","myself",
            "no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","will","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalize text into tokens: lowercase, delete every character outside
/// ASCII alphanumerics and whitespace, split on whitespace runs, drop
/// stopwords. Token order is preserved. Applied identically to document
/// text and query text.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = STRIP.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Indexable text for a problem. The title appears twice so title terms
/// carry double weight relative to the description.
pub fn document_text(title: &str, description: &str) -> String {
    format!("{title} {title} {description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        // Characters are deleted, not replaced with spaces.
        let toks = normalize("Two-Sum (Easy)!");
        assert_eq!(toks, vec!["twosum", "easy"]);
    }

    #[test]
    fn filters_stopwords() {
        let toks = normalize("the quick brown fox and the lazy dog");
        assert!(!toks.contains(&"the".to_string()));
        assert!(!toks.contains(&"and".to_string()));
        assert!(toks.contains(&"quick".to_string()));
    }

    #[test]
    fn deterministic_and_order_preserving() {
        let a = normalize("Find shortest path in weighted graph");
        let b = normalize("Find shortest path in weighted graph");
        assert_eq!(a, b);
        assert_eq!(a, vec!["find", "shortest", "path", "weighted", "graph"]);
    }

    #[test]
    fn non_ascii_is_deleted() {
        let toks = normalize("café naïve 42");
        assert_eq!(toks, vec!["caf", "nave", "42"]);
    }

    #[test]
    fn title_counted_twice() {
        let text = document_text("Two Sum", "array hashmap");
        assert_eq!(text, "Two Sum Two Sum array hashmap");
    }
}
