//! Nested aggregation placement
//!
//! [`AggsPath`] tracks where the next aggregation is written while buckets are
//! nested one inside the other. [`insert_at`] writes a value at a key path,
//! creating intermediate objects as it goes.

use crate::aggregations::{AggregationKind, AggregationNode};
use serde_json::{Map, Value};

/// Key under which child aggregations live
pub const AGGS_KEY: &str = "aggs";

/// Insertion path for aggregations, starting at the document's `aggs` key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggsPath {
    segments: Vec<String>,
}

impl Default for AggsPath {
    fn default() -> Self {
        Self::new()
    }
}

impl AggsPath {
    pub fn new() -> Self {
        Self {
            segments: vec![AGGS_KEY.to_string()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Full key path of a node placed at the current depth: `... / name / tag`
    pub fn node_path<'a>(&'a self, node: &'a AggregationNode) -> Vec<&'a str> {
        let mut path: Vec<&'a str> = self.segments.iter().map(String::as_str).collect();
        path.push(&node.name);
        path.push(node.tag());
        path
    }

    /// Move below a bucket that was just placed.
    ///
    /// Only `terms` buckets carry their own name into the path. Every other
    /// bucket kind places its children at `<current>/aggs`, one level above
    /// where the bucket body lives.
    pub fn descend(&mut self, bucket: &AggregationNode) {
        if bucket.kind == AggregationKind::Terms {
            self.segments.push(bucket.name.clone());
        }
        self.segments.push(AGGS_KEY.to_string());
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

/// Set `value` at `path` inside `root`.
///
/// Missing intermediate keys become empty objects and a non-object value found
/// on the way is replaced by an object. Existing sibling keys are untouched.
pub fn insert_at(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for key in parents {
        let entry = current
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => unreachable!("intermediate value was just made an object"),
        };
    }

    current.insert(last.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_creates_intermediates() {
        let mut root = Map::new();
        insert_at(&mut root, &["query", "bool", "filter"], json!(1));
        assert_eq!(Value::Object(root), json!({"query": {"bool": {"filter": 1}}}));
    }

    #[test]
    fn test_insert_keeps_siblings() {
        let mut root = Map::new();
        insert_at(&mut root, &["aggs", "a", "terms"], json!({"script": "a"}));
        insert_at(&mut root, &["aggs", "b", "terms"], json!({"script": "b"}));
        assert_eq!(
            Value::Object(root),
            json!({"aggs": {"a": {"terms": {"script": "a"}}, "b": {"terms": {"script": "b"}}}})
        );
    }

    #[test]
    fn test_insert_replaces_scalar_intermediate() {
        let mut root = Map::new();
        insert_at(&mut root, &["a"], json!("scalar"));
        insert_at(&mut root, &["a", "b"], json!(true));
        assert_eq!(Value::Object(root), json!({"a": {"b": true}}));
    }

    #[test]
    fn test_insert_overwrites_leaf() {
        let mut root = Map::new();
        insert_at(&mut root, &["a", "b"], json!(1));
        insert_at(&mut root, &["a", "b"], json!(2));
        assert_eq!(Value::Object(root), json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_insert_empty_path_is_noop() {
        let mut root = Map::new();
        insert_at(&mut root, &[], json!(1));
        assert!(root.is_empty());
    }

    #[test]
    fn test_terms_bucket_threads_name() {
        let mut path = AggsPath::new();
        let bucket = AggregationNode::terms_script("region", "region");
        assert_eq!(path.node_path(&bucket), vec!["aggs", "region", "terms"]);

        path.descend(&bucket);
        assert_eq!(path.segments(), &["aggs", "region", "aggs"]);
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_non_terms_bucket_drops_name() {
        let mut path = AggsPath::new();
        let bucket = AggregationNode::date_histogram("date_histogram(ts, 1d)", "ts", "1d");
        assert_eq!(
            path.node_path(&bucket),
            vec!["aggs", "date_histogram(ts, 1d)", "date_histogram"]
        );

        path.descend(&bucket);
        assert_eq!(path.segments(), &["aggs", "aggs"]);
    }

    #[test]
    fn test_mixed_descent() {
        let mut path = AggsPath::default();
        path.descend(&AggregationNode::terms_script("region", "region"));
        path.descend(&AggregationNode::date_histogram("dh", "ts", "1d"));
        path.descend(&AggregationNode::terms_script("city", "city"));
        assert_eq!(
            path.segments(),
            &["aggs", "region", "aggs", "aggs", "city", "aggs"]
        );
    }
}
