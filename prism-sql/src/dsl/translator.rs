//! Query to aggregation DSL assembly

use crate::aggregations::{build_buckets, build_metrics, AggregationList};
use crate::dsl::path::{insert_at, AggsPath};
use crate::error::TranslateError;
use crate::query::{Query, SortField};
use serde_json::{Map, Value};

/// Key path of the script filter built from the `WHERE` predicate
const FILTER_SCRIPT_PATH: [&str; 5] = ["query", "bool", "filter", "script", "script"];

/// Translates a parsed [`Query`] into a search request document.
///
/// Stateless: every call builds its own descriptor lists and document, so one
/// translator can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DslTranslator;

impl DslTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Build the request document.
    ///
    /// Buckets and metrics are resolved before anything is assembled, so an
    /// unsupported aggregation never yields a partial document.
    pub fn translate(&self, query: &Query) -> Result<Value, TranslateError> {
        let buckets = build_buckets(&query.dimensions)?;
        let metrics = build_metrics(&query.fields)?;

        tracing::debug!(
            buckets = buckets.len(),
            metrics = metrics.len(),
            sort_fields = query.sort_fields.len(),
            filtered = query.filter_condition.is_some(),
            "Translating query to aggregation DSL"
        );

        let mut doc = Map::new();
        doc.insert("from".to_string(), Value::from(query.offset));
        doc.insert("size".to_string(), Value::from(query.limit));
        doc.insert("sort".to_string(), Self::translate_sort(&query.sort_fields));

        if let Some(condition) = &query.filter_condition {
            insert_at(
                &mut doc,
                &FILTER_SCRIPT_PATH,
                Value::String(condition.to_script()),
            );
        }

        Self::assemble_aggregations(&mut doc, &buckets, &metrics);

        let doc = Value::Object(doc);
        if tracing::enabled!(target: "prism_sql::dsl", tracing::Level::TRACE) {
            if let Ok(pretty) = serde_json::to_string_pretty(&doc) {
                tracing::trace!(target: "prism_sql::dsl", "Assembled DSL:\n{}", pretty);
            }
        }

        Ok(doc)
    }

    /// Translate and serialize to compact JSON, surfacing every failure
    pub fn try_to_dsl_string(&self, query: &Query) -> Result<String, TranslateError> {
        let doc = self.translate(query)?;
        Ok(serde_json::to_string(&doc)?)
    }

    /// Translate and serialize to indented JSON
    pub fn to_dsl_string_pretty(&self, query: &Query) -> Result<String, TranslateError> {
        let doc = self.translate(query)?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Translate and serialize to compact JSON.
    ///
    /// Returns an empty string when translation or serialization fails; callers
    /// must treat empty output as failure.
    pub fn to_dsl_string(&self, query: &Query) -> String {
        match self.try_to_dsl_string(query) {
            Ok(dsl) => dsl,
            Err(e) if e.is_query_error() => {
                tracing::warn!(error = %e, error_type = e.error_type(), "DSL translation failed");
                String::new()
            }
            Err(e) => {
                tracing::error!(error = %e, error_type = e.error_type(), "DSL serialization failed");
                String::new()
            }
        }
    }

    /// `[{"<field>": "asc"|"desc"}, ...]`
    pub fn translate_sort(sort_fields: &[SortField]) -> Value {
        let clauses = sort_fields
            .iter()
            .map(|sf| {
                let mut clause = Map::new();
                clause.insert(sf.name.clone(), Value::String(sf.order().to_string()));
                Value::Object(clause)
            })
            .collect();
        Value::Array(clauses)
    }

    /// Nest buckets in order, then hang every metric at the innermost depth
    pub fn assemble_aggregations(
        doc: &mut Map<String, Value>,
        buckets: &AggregationList,
        metrics: &AggregationList,
    ) {
        let mut path = AggsPath::new();

        for bucket in buckets {
            insert_at(
                doc,
                &path.node_path(bucket),
                Value::Object(bucket.params.clone()),
            );
            path.descend(bucket);
        }

        for metric in metrics {
            insert_at(
                doc,
                &path.node_path(metric),
                Value::Object(metric.params.clone()),
            );
        }

        tracing::trace!(depth = path.depth(), "Aggregation tree assembled");
    }
}
