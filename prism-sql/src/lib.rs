//! SQL-style aggregate queries to search engine aggregation DSL
//!
//! This crate turns an already-parsed `SELECT`-like statement into the nested
//! JSON request body understood by Elasticsearch-compatible aggregation
//! frameworks.
//!
//! # Pipeline
//!
//! - Grouping dimensions become bucket aggregations (`terms`, `date_histogram`)
//! - Aggregate calls in the projection become metric aggregations
//!   (`avg`, `sum`, `min`, `max`, `stats`, ...)
//! - Buckets nest in declaration order and metrics attach at the innermost level
//!
//! # Example
//!
//! ```rust
//! use prism_sql::{DslTranslator, Expr, Query};
//!
//! let query = Query::new()
//!     .with_limit(0)
//!     .group_by(Expr::field("region"))
//!     .select(Expr::call("sum", vec![Expr::field("amount")]));
//!
//! let dsl = DslTranslator::new().translate(&query).unwrap();
//! assert_eq!(dsl["aggs"]["region"]["terms"]["script"], "region");
//! ```

pub mod aggregations;
pub mod config;
pub mod dsl;
pub mod error;
pub mod query;

pub use aggregations::{AggregationFamily, AggregationKind, AggregationList, AggregationNode};
pub use dsl::DslTranslator;
pub use error::TranslateError;
pub use query::{BinaryOp, Expr, Literal, Query, SortField, UnaryOp};

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;
