//! Error types for query translation

/// Translation errors
///
/// Every variant except [`TranslateError::Serialization`] is raised while the
/// bucket and metric descriptors are built, before any document exists.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Unsupported bucket aggregation: {0}")]
    UnsupportedBucketAggregation(String),

    #[error("Unsupported metric aggregation: {0}")]
    UnsupportedMetricAggregation(String),

    #[error("Invalid arguments for {function}: expected {expected}, found {found}")]
    InvalidArguments {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate aggregation name: {0}")]
    DuplicateAggregation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TranslateError {
    /// Stable machine-readable code for this error
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnsupportedBucketAggregation(_) => "unsupported_bucket_aggregation",
            Self::UnsupportedMetricAggregation(_) => "unsupported_metric_aggregation",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::DuplicateAggregation(_) => "duplicate_aggregation",
            Self::Serialization(_) => "serialization_failure",
        }
    }

    /// Whether the error is caused by the query itself rather than by output rendering
    pub fn is_query_error(&self) -> bool {
        !matches!(self, Self::Serialization(_))
    }
}
