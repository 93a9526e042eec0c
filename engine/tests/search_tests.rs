use engine::index::{Index, Platform, Problem};
use engine::query::vectorize;
use engine::rank::{search, SortOrder};

fn problem(title: &str, description: &str, url: &str) -> Problem {
    Problem {
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
    }
}

fn sample_index() -> Index {
    Index::build(vec![
        problem(
            "Two Sum",
            "array hashmap",
            "https://leetcode.com/problems/two-sum/",
        ),
        problem(
            "Graph Traversal",
            "bfs dfs graph",
            "https://codeforces.com/problemset/problem/1/A",
        ),
    ])
}

#[test]
fn query_matches_only_relevant_document() {
    let index = sample_index();
    let (vector, magnitude) = vectorize("graph", &index);
    let page = search(&index, &vector, magnitude, SortOrder::Relevance, 1, 10);

    assert_eq!(page.results.len(), 1);
    let hit = &page.results[0];
    assert_eq!(hit.title, "Graph Traversal");
    assert_eq!(hit.platform, Platform::Codeforces);
    assert!(hit.score > 0.0);
    assert_eq!(page.pagination.total_results, 1);
    assert_eq!(page.pagination.total_pages, 1);
}

#[test]
fn scores_lie_within_unit_interval() {
    let index = sample_index();
    for query in ["graph", "two sum array", "graph traversal bfs dfs graph"] {
        let (vector, magnitude) = vectorize(query, &index);
        let page = search(&index, &vector, magnitude, SortOrder::Relevance, 1, 10);
        for hit in &page.results {
            assert!(hit.score > 0.0 && hit.score <= 1.0, "score {} for {query:?}", hit.score);
        }
    }
}

#[test]
fn corpus_wide_terms_are_dropped_from_the_query_vector() {
    let index = Index::build(vec![
        problem("Array sum", "sum of array", "https://leetcode.com/problems/a/"),
        problem("Array product", "product of array", "https://leetcode.com/problems/b/"),
    ]);
    // "array" appears in every document, so its idf is zero.
    let (vector, _) = vectorize("array sum", &index);
    assert!(!vector.contains_key("array"));
    assert!(vector.contains_key("sum"));
}

#[test]
fn query_of_unknown_terms_yields_no_results() {
    let index = sample_index();
    let (vector, magnitude) = vectorize("zebra quantum", &index);
    assert!(vector.is_empty());
    // Magnitude defaults to 1 so scoring stays defined.
    assert_eq!(magnitude, 1.0);
    let page = search(&index, &vector, magnitude, SortOrder::Relevance, 1, 10);
    assert!(page.results.is_empty());
    assert_eq!(page.pagination.total_pages, 0);
}

#[test]
fn query_term_frequency_is_length_normalized() {
    let index = sample_index();
    let (vector, _) = vectorize("graph graph bfs", &index);
    // tf(graph) = 2/3, tf(bfs) = 1/3, identical idf.
    let graph = vector["graph"];
    let bfs = vector["bfs"];
    assert!((graph - 2.0 * bfs).abs() < 1e-12);
}

#[test]
fn equal_scores_preserve_corpus_order() {
    let index = Index::build(vec![
        problem("Shortest Path I", "dijkstra graph", "https://codeforces.com/problemset/problem/2/A"),
        problem("Shortest Path I", "dijkstra graph", "https://codeforces.com/problemset/problem/2/B"),
        problem("Shortest Path I", "dijkstra graph", "https://codeforces.com/problemset/problem/2/C"),
    ]);
    let (vector, magnitude) = vectorize("dijkstra", &index);
    let page = search(&index, &vector, magnitude, SortOrder::Relevance, 1, 10);

    assert_eq!(page.results.len(), 3);
    assert!(page.results[0].score == page.results[1].score);
    let urls: Vec<&str> = page.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://codeforces.com/problemset/problem/2/A",
            "https://codeforces.com/problemset/problem/2/B",
            "https://codeforces.com/problemset/problem/2/C",
        ]
    );
}

#[test]
fn title_sort_replaces_relevance_order() {
    let index = Index::build(vec![
        problem("Zig Zag Graph", "graph graph graph graph", "https://codeforces.com/problemset/problem/3/A"),
        problem("Alpha Graph", "graph once", "https://codeforces.com/problemset/problem/3/B"),
        problem("Binary Tree", "tree traversal", "https://codeforces.com/problemset/problem/3/C"),
    ]);
    let (vector, magnitude) = vectorize("graph", &index);

    let by_relevance = search(&index, &vector, magnitude, SortOrder::Relevance, 1, 10);
    assert_eq!(by_relevance.results[0].title, "Zig Zag Graph");

    let desc = search(&index, &vector, magnitude, SortOrder::TitleDesc, 1, 10);
    let titles: Vec<&str> = desc.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Zig Zag Graph", "Alpha Graph"]);

    let asc = search(&index, &vector, magnitude, SortOrder::TitleAsc, 1, 10);
    let titles: Vec<&str> = asc.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha Graph", "Zig Zag Graph"]);
}

#[test]
fn pagination_clips_to_available_results() {
    let index = sample_index();
    let (vector, magnitude) = vectorize("two sum graph traversal", &index);
    // Both documents match; one result per page.
    let page1 = search(&index, &vector, magnitude, SortOrder::Relevance, 1, 1);
    assert_eq!(page1.results.len(), 1);
    assert_eq!(page1.pagination.total_results, 2);
    assert_eq!(page1.pagination.total_pages, 2);

    let page3 = search(&index, &vector, magnitude, SortOrder::Relevance, 3, 1);
    assert!(page3.results.is_empty());
    assert_eq!(page3.pagination.current_page, 3);
    assert_eq!(page3.pagination.total_pages, 2);
}

#[test]
fn page_and_per_page_are_clamped_to_one() {
    let index = sample_index();
    let (vector, magnitude) = vectorize("graph", &index);
    let page = search(&index, &vector, magnitude, SortOrder::Relevance, 0, 0);
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.per_page, 1);
    assert_eq!(page.results.len(), 1);
}

#[test]
fn total_pages_is_ceiling_of_results_over_per_page() {
    let index = Index::build(
        (0..7)
            .map(|i| {
                problem(
                    &format!("Graph Problem {i}"),
                    "graph theory",
                    &format!("https://codeforces.com/problemset/problem/10/{i}"),
                )
            })
            .collect(),
    );
    // One distinct numbered term per document; every document matches.
    let (vector, magnitude) = vectorize("0 1 2 3 4 5 6", &index);
    let page = search(&index, &vector, magnitude, SortOrder::Relevance, 2, 3);
    assert_eq!(page.pagination.total_results, 7);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.results.len(), 3);
}
