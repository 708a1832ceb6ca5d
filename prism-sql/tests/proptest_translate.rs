//! Property-based tests for the DSL translator.
//!
//! Uses `proptest` to generate random paging, sort lists and grouping
//! dimensions and checks the invariants of the emitted document.

use prism_sql::{DslTranslator, Expr, Query, SortField};
use proptest::prelude::*;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

fn sort_field() -> impl Strategy<Value = SortField> {
    (field_name(), any::<bool>()).prop_map(|(name, ascending)| SortField { name, ascending })
}

fn metric_call() -> impl Strategy<Value = Expr> {
    (
        prop::sample::select(vec!["avg", "sum", "min", "max", "count", "stats", "cardinality"]),
        field_name(),
    )
        .prop_map(|(function, field)| Expr::call(function, vec![Expr::field(field)]))
}

fn distinct_dimensions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(field_name(), 0..4).prop_map(|set| set.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_paging_and_sort_reflected(
        offset in 0usize..10_000,
        limit in 0usize..10_000,
        sort in prop::collection::vec(sort_field(), 0..8),
    ) {
        let mut query = Query::new().with_offset(offset).with_limit(limit);
        for sf in &sort {
            query = query.sort_by(sf.clone());
        }

        let doc = DslTranslator::new().translate(&query).unwrap();
        prop_assert_eq!(doc["from"].as_u64(), Some(offset as u64));
        prop_assert_eq!(doc["size"].as_u64(), Some(limit as u64));
        prop_assert!(doc.get("aggs").is_none());

        let emitted = doc["sort"].as_array().unwrap();
        prop_assert_eq!(emitted.len(), sort.len());
        for (entry, sf) in emitted.iter().zip(&sort) {
            let obj = entry.as_object().unwrap();
            prop_assert_eq!(obj.len(), 1);
            let expected = if sf.ascending { "asc" } else { "desc" };
            prop_assert_eq!(obj.get(&sf.name).and_then(Value::as_str), Some(expected));
        }
    }

    #[test]
    fn test_terms_nesting_depth(
        dims in distinct_dimensions(),
        metrics in prop::collection::vec(metric_call(), 0..4),
    ) {
        let mut query = Query::new();
        for d in &dims {
            query = query.group_by(Expr::field(d.clone()));
        }
        for m in &metrics {
            query = query.select(m.clone());
        }

        let doc = DslTranslator::new().translate(&query).unwrap();

        // Walk down through each terms bucket in order
        let mut level = doc.get("aggs");
        for d in &dims {
            let node = level.and_then(|l| l.get(d));
            prop_assert!(node.is_some(), "missing bucket {}", d);
            let node = node.unwrap();
            prop_assert_eq!(node["terms"]["script"].as_str(), Some(d.as_str()));
            level = node.get("aggs");
        }

        for m in &metrics {
            let name = m.to_string();
            let placed = level.and_then(|l| l.get(&name));
            prop_assert!(placed.is_some(), "missing metric {}", name);
        }
    }

    #[test]
    fn test_serialized_round_trip(
        dims in distinct_dimensions(),
        metrics in prop::collection::vec(metric_call(), 0..4),
        filter in prop::option::of(field_name()),
        interval in prop::sample::select(vec!["1m", "1h", "1d", "1w"]),
    ) {
        let mut query = Query::new().group_by(Expr::call(
            "date_histogram",
            vec![Expr::field("ts"), Expr::duration(interval)],
        ));
        for d in &dims {
            query = query.group_by(Expr::field(d.clone()));
        }
        for m in &metrics {
            query = query.select(m.clone());
        }
        if let Some(f) = filter {
            query = query.filter(Expr::field(f));
        }

        let translator = DslTranslator::new();
        let doc = translator.translate(&query).unwrap();
        let text = translator.to_dsl_string(&query);
        prop_assert!(!text.is_empty());

        let reparsed: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(reparsed, doc);
    }
}
