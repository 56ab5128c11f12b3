//! Metric kind model.
//!
//! Every statistic the exporter knows about is described by a [`MetricKind`]:
//! the exposed series name, its help text, how it is exposed (gauge, counter
//! or histogram), and how raw `zpool` text converts into a numeric value.
//! Kinds are defined once as `static` tables in [`crate::registry`] and are
//! read-only for the lifetime of the process.

/// How a metric kind is exposed to the scraping collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exposition {
    /// A point-in-time value (sizes, ratios, states, queue depths).
    Gauge,
    /// A cumulative count (operation and bandwidth totals).
    Counter,
    /// A labeled bucket distribution.
    Histogram,
}

impl std::fmt::Display for Exposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gauge => write!(f, "gauge"),
            Self::Counter => write!(f, "counter"),
            Self::Histogram => write!(f, "histogram"),
        }
    }
}

/// Unit of the bucket-boundary labels in a histogram table.
///
/// Latency histograms report boundaries in nanoseconds and are exposed in
/// seconds; request size histograms report boundaries in bytes and are
/// exposed unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketUnit {
    Nanoseconds,
    Bytes,
}

/// Semantic conversion rule from a raw output field to a metric value.
///
/// The rule set is closed: each variant is dispatched exhaustively in
/// [`crate::convert`], so adding a variant fails to compile until every
/// conversion site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// Integer field, exported verbatim.
    Int,
    /// Floating point field, exported verbatim.
    Float,
    /// Percentage field, exported as a 0..1 fraction.
    Ratio,
    /// Nanosecond field, exported in seconds.
    TimeNanos,
    /// Pool health string, exported as its numeric state code.
    State,
    /// Histogram table: bucket boundaries in the given unit, counts verbatim.
    HistogramBuckets(BucketUnit),
}

/// Immutable description of one exported statistic.
///
/// Identity is `name`, which is globally unique and used verbatim as the
/// exposed series name.
#[derive(Debug, Clone, Copy)]
pub struct MetricKind {
    /// Exposed series name, including the `zpool_iostat` prefix.
    pub name: &'static str,
    /// Help text shown in the exposition.
    pub help: &'static str,
    /// Exposition category.
    pub exposition: Exposition,
    /// Conversion rule for raw fields of this kind.
    pub conversion: Conversion,
}

impl PartialEq for MetricKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MetricKind {}
