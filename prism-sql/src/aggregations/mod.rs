mod bucket;
mod kind;
mod metric;
pub mod types;

pub use bucket::build_buckets;
pub use kind::{AggregationFamily, AggregationKind};
pub use metric::build_metrics;
pub use types::{AggregationList, AggregationNode};
