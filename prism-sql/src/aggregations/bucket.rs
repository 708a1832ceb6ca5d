//! Grouping dimensions to bucket aggregations

use crate::aggregations::types::{AggregationList, AggregationNode};
use crate::error::TranslateError;
use crate::query::Expr;
use std::collections::HashSet;

/// The only call form accepted as a grouping dimension
const DATE_HISTOGRAM: &str = "date_histogram";

/// Build one bucket descriptor per dimension, in dimension order.
///
/// Plain expressions group through a script-keyed `terms` bucket and
/// `date_histogram(field, interval)` maps to a `date_histogram` bucket. A
/// `date_histogram` call of any other arity is grouped like a plain
/// expression. Any other call is rejected, as are two dimensions rendering to
/// the same key.
pub fn build_buckets(dimensions: &[Expr]) -> Result<AggregationList, TranslateError> {
    let mut buckets = Vec::with_capacity(dimensions.len());
    let mut seen = HashSet::with_capacity(dimensions.len());

    for dimension in dimensions {
        let bucket = build_bucket(dimension)?;
        debug_assert!(bucket.kind.is_bucket());

        if !seen.insert(bucket.name.clone()) {
            return Err(TranslateError::DuplicateAggregation(bucket.name));
        }
        buckets.push(bucket);
    }

    Ok(buckets)
}

fn build_bucket(dimension: &Expr) -> Result<AggregationNode, TranslateError> {
    let name = dimension.to_script();

    match dimension.as_call() {
        Some((DATE_HISTOGRAM, [field, interval])) => Ok(AggregationNode::date_histogram(
            name,
            field.to_script(),
            interval.to_script(),
        )),
        Some((DATE_HISTOGRAM, _)) | None => {
            let script = name.clone();
            Ok(AggregationNode::terms_script(name, script))
        }
        Some(_) => Err(TranslateError::UnsupportedBucketAggregation(name)),
    }
}
