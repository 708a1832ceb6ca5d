//! Aggregate calls in the projection to metric aggregations

use crate::aggregations::kind::AggregationKind;
use crate::aggregations::types::{AggregationList, AggregationNode};
use crate::error::TranslateError;
use crate::query::Expr;

/// Resolve an aggregate function name to its metric kind
fn metric_kind(function: &str) -> Option<AggregationKind> {
    let kind = match function {
        "avg" => AggregationKind::Avg,
        "cardinality" => AggregationKind::Cardinality,
        "sum" => AggregationKind::Sum,
        "max" => AggregationKind::Max,
        "min" => AggregationKind::Min,
        "top" => AggregationKind::Top,
        "count" => AggregationKind::ValueCount,
        "stats" => AggregationKind::Stats,
        "extended_stats" => AggregationKind::ExtendedStats,
        _ => return None,
    };
    Some(kind)
}

/// Build one metric descriptor per aggregate call in `fields`.
///
/// Fields that are not calls are plain projections and are skipped. Selecting
/// the same call twice yields a single descriptor.
pub fn build_metrics(fields: &[Expr]) -> Result<AggregationList, TranslateError> {
    let mut metrics: AggregationList = Vec::new();

    for field in fields {
        let Some((function, args)) = field.as_call() else {
            continue;
        };

        let name = field.to_script();
        let kind = metric_kind(function)
            .ok_or_else(|| TranslateError::UnsupportedMetricAggregation(name.clone()))?;
        debug_assert!(kind.is_metric());

        let [arg] = args else {
            return Err(TranslateError::InvalidArguments {
                function: function.to_string(),
                expected: 1,
                found: args.len(),
            });
        };

        if metrics.iter().any(|m| m.name == name) {
            tracing::debug!(aggregation = %name, "Skipping repeated metric aggregation");
            continue;
        }

        metrics.push(AggregationNode::script_metric(kind, name, arg.to_script()));
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BinaryOp;
    use serde_json::{json, Value};

    fn call(name: &str, arg: Expr) -> Expr {
        Expr::call(name, vec![arg])
    }

    #[test]
    fn test_avg() {
        let metrics = build_metrics(&[call("avg", Expr::field("price"))]).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "avg(price)");
        assert_eq!(metrics[0].kind, AggregationKind::Avg);
        assert_eq!(Value::Object(metrics[0].params.clone()), json!({"script": "price"}));
    }

    #[test]
    fn test_dispatch_table() {
        let cases = [
            ("avg", AggregationKind::Avg),
            ("cardinality", AggregationKind::Cardinality),
            ("sum", AggregationKind::Sum),
            ("max", AggregationKind::Max),
            ("min", AggregationKind::Min),
            ("top", AggregationKind::Top),
            ("count", AggregationKind::ValueCount),
            ("stats", AggregationKind::Stats),
            ("extended_stats", AggregationKind::ExtendedStats),
        ];
        for (function, expected) in cases {
            let metrics = build_metrics(&[call(function, Expr::field("x"))]).unwrap();
            assert_eq!(metrics[0].kind, expected, "function {}", function);
        }
    }

    #[test]
    fn test_plain_fields_skipped() {
        let fields = vec![
            Expr::field("name"),
            call("sum", Expr::field("amount")),
            Expr::Wildcard,
            Expr::integer(1),
        ];
        let metrics = build_metrics(&fields).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "sum(amount)");
    }

    #[test]
    fn test_script_argument() {
        let arg = Expr::binary(Expr::field("price"), BinaryOp::Mul, Expr::field("qty"));
        let metrics = build_metrics(&[call("sum", arg)]).unwrap();
        assert_eq!(metrics[0].name, "sum(price * qty)");
        assert_eq!(metrics[0].params["script"], json!("price * qty"));
    }

    #[test]
    fn test_unsupported_metric() {
        match build_metrics(&[call("median", Expr::field("price"))]) {
            Err(TranslateError::UnsupportedMetricAggregation(name)) => {
                assert_eq!(name, "median(price)");
            }
            other => panic!("Expected UnsupportedMetricAggregation, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_arity() {
        let field = Expr::call("avg", vec![Expr::field("a"), Expr::field("b")]);
        match build_metrics(&[field]) {
            Err(TranslateError::InvalidArguments { expected, found, .. }) => {
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }

        assert!(build_metrics(&[Expr::call("count", vec![])]).is_err());
    }

    #[test]
    fn test_repeated_call_collapsed() {
        let fields = vec![
            call("max", Expr::field("ts")),
            call("min", Expr::field("ts")),
            call("max", Expr::field("ts")),
        ];
        let names: Vec<String> = build_metrics(&fields)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["max(ts)", "min(ts)"]);
    }

    #[test]
    fn test_count_star() {
        let metrics = build_metrics(&[call("count", Expr::Wildcard)]).unwrap();
        assert_eq!(metrics[0].name, "count(*)");
        assert_eq!(metrics[0].params["script"], json!("*"));
    }
}
