//! Value conversion layer.
//!
//! Shared by both table parsers. Conversion is total: malformed input never
//! raises past this boundary. The missing-value sentinel `-` (zpool's "no
//! data" marker) and absent fields convert silently; any other unparsable
//! text is logged with enough context to diagnose a version skew in zpool's
//! output format, then treated as missing as well.

use crate::kind::{BucketUnit, Conversion, MetricKind};

/// zpool prints `-` for properties that do not apply (e.g. checkpoint size
/// on a pool without a checkpoint).
const MISSING_SENTINEL: &str = "-";

/// Fixed pool health states and their exported codes.
const POOL_STATES: &[(&str, f64)] = &[
    ("ONLINE", 0.0),
    ("DEGRADED", 1.0),
    ("FAULTED", 2.0),
    ("OFFLINE", 3.0),
    ("UNAVAIL", 4.0),
    ("REMOVED", 5.0),
];

fn warn_unconvertible(kind: &MetricKind, pool: &str, raw: &str) {
    log::warn!(
        "failed to convert {}{{pool='{}'}} raw value {:?}",
        kind.name,
        pool,
        raw
    );
}

fn parse_f64(kind: &MetricKind, pool: &str, raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn_unconvertible(kind, pool, raw);
            None
        }
    }
}

/// Convert one scalar table field into a metric value.
///
/// `raw` is `None` when the source line had fewer fields than the registry
/// declares; that degrades to missing exactly like the `-` sentinel.
pub fn scalar_value(kind: &MetricKind, pool: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if raw == MISSING_SENTINEL {
        return None;
    }

    match kind.conversion {
        Conversion::Int => match raw.parse::<i64>() {
            Ok(v) => Some(v as f64),
            Err(_) => {
                warn_unconvertible(kind, pool, raw);
                None
            }
        },
        Conversion::Float => parse_f64(kind, pool, raw),
        Conversion::Ratio => parse_f64(kind, pool, raw).map(|v| v / 100.0),
        Conversion::TimeNanos => parse_f64(kind, pool, raw).map(|v| v * 1e-9),
        Conversion::State => {
            let code = POOL_STATES
                .iter()
                .find(|(name, _)| *name == raw)
                .map(|(_, code)| *code);
            if code.is_none() {
                warn_unconvertible(kind, pool, raw);
            }
            code
        }
        // Histogram kinds never appear in scalar tables.
        Conversion::HistogramBuckets(_) => None,
    }
}

/// Convert one bucket-boundary label of a histogram block.
///
/// Unparsable boundaries become NaN so the bucket sequence keeps its width.
pub fn bucket_bound(kind: &MetricKind, pool: &str, raw: &str) -> f64 {
    let scale = match kind.conversion {
        Conversion::HistogramBuckets(BucketUnit::Nanoseconds) => 1e-9,
        _ => 1.0,
    };
    match raw.parse::<f64>() {
        Ok(v) => v * scale,
        Err(_) => {
            warn_unconvertible(kind, pool, raw);
            f64::NAN
        }
    }
}

/// Convert one value cell of a histogram block.
///
/// `raw` is `None` for cells beyond a short row's width; both those and the
/// `-` sentinel pad with NaN rather than dropping the cell, preserving
/// column alignment across the block's series.
pub fn histogram_cell(kind: &MetricKind, pool: &str, raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::NAN;
    };
    if raw == MISSING_SENTINEL {
        return f64::NAN;
    }
    match raw.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn_unconvertible(kind, pool, raw);
            f64::NAN
        }
    }
}
