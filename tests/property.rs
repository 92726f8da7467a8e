//! Property-based tests using proptest.
//!
//! These verify the documented laws over generated inputs: determinism,
//! the truncation law, conjunctive keyword semantics, ranking totality, and
//! rejection of short tokens.

mod common;

use common::{catalog_index, engine};
use proptest::prelude::*;
use zotsearch::{compare_ids, match_keyword, SearchError, SearchOptions};

/// Queries drawn from the fixture's vocabulary, in every classification
/// shape.
fn query_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "cs161".to_string(),
        "compsci161".to_string(),
        "cs 161".to_string(),
        "cs 161, 171".to_string(),
        "161".to_string(),
        "ics31".to_string(),
        "ge2".to_string(),
        "geii".to_string(),
        "ge-5b".to_string(),
        "ge2, ge5b".to_string(),
        "math".to_string(),
        "science".to_string(),
        "compsci".to_string(),
        "calculus".to_string(),
        "peltzer".to_string(),
        "design algorithms".to_string(),
        "algorithms".to_string(),
    ])
}

/// Arbitrary strings over the query alphabet, valid or not.
fn raw_query_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9 ,&/-]{0,16}").unwrap()
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "design".to_string(),
        "algorithms".to_string(),
        "calculus".to_string(),
        "science".to_string(),
        "computer".to_string(),
        "introduction".to_string(),
        "peltzer".to_string(),
        "statistics".to_string(),
    ])
}

proptest! {
    /// For fixed index and query, repeated calls return identical output,
    /// whether that output is a result set or an error.
    #[test]
    fn search_is_deterministic(query in raw_query_strategy(), n in 1usize..20) {
        let engine = engine();
        let options = SearchOptions::default().with_num_results(n);
        let first = engine.search(&query, &options);
        let second = engine.search(&query, &options);
        prop_assert_eq!(first, second);
    }

    /// `len(search(q, n)) <= n` for all q and n.
    #[test]
    fn truncation_bounds_length(query in raw_query_strategy(), n in 1usize..10) {
        let engine = engine();
        if let Ok(hits) = engine.search(&query, &SearchOptions::default().with_num_results(n)) {
            prop_assert!(hits.len() <= n);
        }
    }

    /// `search(q, n)` is a prefix of `search(q, m)` for `n <= m`.
    #[test]
    fn truncation_is_prefix_stable(query in query_strategy(), n in 1usize..8, extra in 0usize..8) {
        let engine = engine();
        let m = n + extra;
        let short = engine.search(&query, &SearchOptions::default().with_num_results(n)).unwrap();
        let long = engine.search(&query, &SearchOptions::default().with_num_results(m)).unwrap();
        prop_assert!(short.len() <= long.len());
        prop_assert_eq!(short.as_slice(), &long[..short.len()]);
    }

    /// Every result of a two-keyword query is reachable from each keyword
    /// individually.
    #[test]
    fn conjunction_law(a in keyword_strategy(), b in keyword_strategy()) {
        let index = catalog_index();
        let engine = engine();
        let query = format!("{a} {b}");
        let hits = engine.search(&query, &SearchOptions::default()).unwrap();

        let from_a = match_keyword(&index, &a, usize::MAX);
        let from_b = match_keyword(&index, &b, usize::MAX);
        for hit in &hits {
            prop_assert!(from_a.contains(&hit.id), "{} not reachable from {a:?}", hit.id);
            prop_assert!(from_b.contains(&hit.id), "{} not reachable from {b:?}", hit.id);
        }
    }

    /// The ranking comparator is a total order: antisymmetric and
    /// transitive over arbitrary id triples from the index.
    #[test]
    fn ranking_is_a_total_order(seed in 0usize..1000) {
        let index = catalog_index();
        let ids: Vec<&String> = index.objects.keys().collect();
        prop_assume!(ids.len() >= 3);
        let a = ids[seed % ids.len()];
        let b = ids[(seed / 7) % ids.len()];
        let c = ids[(seed / 49) % ids.len()];

        // Antisymmetry
        prop_assert_eq!(compare_ids(&index, a, b), compare_ids(&index, b, a).reverse());
        // Reflexivity
        prop_assert_eq!(compare_ids(&index, a, a), std::cmp::Ordering::Equal);
        // Transitivity (only the ordering-consistent case is checkable)
        if compare_ids(&index, a, b) != std::cmp::Ordering::Greater
            && compare_ids(&index, b, c) != std::cmp::Ordering::Greater
        {
            prop_assert!(compare_ids(&index, a, c) != std::cmp::Ordering::Greater);
        }
    }

    /// Any query containing a keyword token shorter than two characters is
    /// rejected.
    #[test]
    fn single_char_keyword_queries_are_rejected(c in "[a-z]") {
        let engine = engine();
        let err = engine.search(&c, &SearchOptions::default()).unwrap_err();
        let is_invalid_query = matches!(err, SearchError::InvalidQuery { .. });
        prop_assert!(is_invalid_query);
    }
}
