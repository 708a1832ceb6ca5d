//! Aggregation kinds and their engine tags

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationFamily {
    Metric,
    Bucket,
}

impl AggregationFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationFamily::Metric => "metric",
            AggregationFamily::Bucket => "bucket",
        }
    }
}

impl fmt::Display for AggregationFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AggregationFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" | "metrics" => Ok(AggregationFamily::Metric),
            "bucket" | "buckets" => Ok(AggregationFamily::Bucket),
            other => Err(format!("unknown aggregation family: {}", other)),
        }
    }
}

/// Every aggregation the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationKind {
    // Metric aggregations
    Avg,
    Cardinality,
    ExtendedStats,
    GeoBounds,
    GeoCentroid,
    Max,
    Min,
    Percentiles,
    PercentileRanks,
    Stats,
    Sum,
    Top,
    ValueCount,

    // Bucket aggregations
    DateHistogram,
    DateRange,
    Filter,
    Filters,
    GeoDistance,
    GeoHashGrid,
    Global,
    Histogram,
    IpRange,
    Missing,
    Nested,
    Range,
    ReverseNested,
    Sampler,
    SignificantTerms,
    Terms,
}

impl AggregationKind {
    pub const ALL: [AggregationKind; 29] = [
        AggregationKind::Avg,
        AggregationKind::Cardinality,
        AggregationKind::ExtendedStats,
        AggregationKind::GeoBounds,
        AggregationKind::GeoCentroid,
        AggregationKind::Max,
        AggregationKind::Min,
        AggregationKind::Percentiles,
        AggregationKind::PercentileRanks,
        AggregationKind::Stats,
        AggregationKind::Sum,
        AggregationKind::Top,
        AggregationKind::ValueCount,
        AggregationKind::DateHistogram,
        AggregationKind::DateRange,
        AggregationKind::Filter,
        AggregationKind::Filters,
        AggregationKind::GeoDistance,
        AggregationKind::GeoHashGrid,
        AggregationKind::Global,
        AggregationKind::Histogram,
        AggregationKind::IpRange,
        AggregationKind::Missing,
        AggregationKind::Nested,
        AggregationKind::Range,
        AggregationKind::ReverseNested,
        AggregationKind::Sampler,
        AggregationKind::SignificantTerms,
        AggregationKind::Terms,
    ];

    /// Engine tag used as the JSON key of the aggregation body
    pub fn tag(&self) -> &'static str {
        match self {
            AggregationKind::Avg => "avg",
            AggregationKind::Cardinality => "cardinality",
            AggregationKind::ExtendedStats => "extended_stats",
            AggregationKind::GeoBounds => "geo_bounds",
            AggregationKind::GeoCentroid => "geo_centroid",
            AggregationKind::Max => "max",
            AggregationKind::Min => "min",
            AggregationKind::Percentiles => "percentiles",
            AggregationKind::PercentileRanks => "percentile_ranks",
            AggregationKind::Stats => "stats",
            AggregationKind::Sum => "sum",
            AggregationKind::Top => "top",
            AggregationKind::ValueCount => "value_count",

            AggregationKind::DateHistogram => "date_histogram",
            AggregationKind::DateRange => "date_range",
            // Shares the date_range tag with DateRange; kept until the intended tag is confirmed
            AggregationKind::Filter => "date_range",
            AggregationKind::Filters => "filters",
            AggregationKind::GeoDistance => "geo_distance",
            AggregationKind::GeoHashGrid => "geohash_grid",
            AggregationKind::Global => "global",
            AggregationKind::Histogram => "histogram",
            AggregationKind::IpRange => "ip_range",
            AggregationKind::Missing => "missing",
            AggregationKind::Nested => "nested",
            AggregationKind::Range => "range",
            AggregationKind::ReverseNested => "reverse_nested",
            AggregationKind::Sampler => "sampler",
            AggregationKind::SignificantTerms => "significant_terms",
            AggregationKind::Terms => "terms",
        }
    }

    pub fn family(&self) -> AggregationFamily {
        match self {
            AggregationKind::Avg
            | AggregationKind::Cardinality
            | AggregationKind::ExtendedStats
            | AggregationKind::GeoBounds
            | AggregationKind::GeoCentroid
            | AggregationKind::Max
            | AggregationKind::Min
            | AggregationKind::Percentiles
            | AggregationKind::PercentileRanks
            | AggregationKind::Stats
            | AggregationKind::Sum
            | AggregationKind::Top
            | AggregationKind::ValueCount => AggregationFamily::Metric,

            AggregationKind::DateHistogram
            | AggregationKind::DateRange
            | AggregationKind::Filter
            | AggregationKind::Filters
            | AggregationKind::GeoDistance
            | AggregationKind::GeoHashGrid
            | AggregationKind::Global
            | AggregationKind::Histogram
            | AggregationKind::IpRange
            | AggregationKind::Missing
            | AggregationKind::Nested
            | AggregationKind::Range
            | AggregationKind::ReverseNested
            | AggregationKind::Sampler
            | AggregationKind::SignificantTerms
            | AggregationKind::Terms => AggregationFamily::Bucket,
        }
    }

    pub fn is_metric(&self) -> bool {
        self.family() == AggregationFamily::Metric
    }

    pub fn is_bucket(&self) -> bool {
        self.family() == AggregationFamily::Bucket
    }

    /// All kinds of one family, in declaration order
    pub fn of_family(family: AggregationFamily) -> impl Iterator<Item = AggregationKind> {
        Self::ALL.into_iter().filter(move |k| k.family() == family)
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl Serialize for AggregationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl FromStr for AggregationKind {
    type Err = String;

    /// Resolves a tag back to its kind. `date_range` is shared, so it maps to `DateRange`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| format!("unknown aggregation tag: {}", s))
    }
}
