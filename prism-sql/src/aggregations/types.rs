use crate::aggregations::kind::AggregationKind;
use serde::Serialize;
use serde_json::{Map, Value};

/// One aggregation instance: its key, its kind and the kind-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationNode {
    pub name: String,
    pub kind: AggregationKind,
    pub params: Map<String, Value>,
}

/// Ordered aggregation descriptors, in source order
pub type AggregationList = Vec<AggregationNode>;

impl AggregationNode {
    pub fn new(name: impl Into<String>, kind: AggregationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Map::new(),
        }
    }

    /// Add a parameter, keeping insertion order
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Script-keyed `terms` bucket
    pub fn terms_script(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self::new(name, AggregationKind::Terms).with_param("script", script.into())
    }

    pub fn date_histogram(
        name: impl Into<String>,
        field: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self::new(name, AggregationKind::DateHistogram)
            .with_param("field", field.into())
            .with_param("interval", interval.into())
    }

    /// Metric computed over a script
    pub fn script_metric(
        kind: AggregationKind,
        name: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self::new(name, kind).with_param("script", script.into())
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terms_script() {
        let node = AggregationNode::terms_script("region", "region");
        assert_eq!(node.kind, AggregationKind::Terms);
        assert_eq!(Value::Object(node.params), json!({"script": "region"}));
    }

    #[test]
    fn test_date_histogram_params_order() {
        let node = AggregationNode::date_histogram("date_histogram(ts, 1d)", "ts", "1d");
        let keys: Vec<&str> = node.params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["field", "interval"]);
        assert_eq!(node.tag(), "date_histogram");
    }

    #[test]
    fn test_serialize_node() {
        let node = AggregationNode::script_metric(AggregationKind::ValueCount, "count(id)", "id");
        let v = serde_json::to_value(&node).unwrap();
        assert_eq!(
            v,
            json!({"name": "count(id)", "kind": "value_count", "params": {"script": "id"}})
        );
    }
}
