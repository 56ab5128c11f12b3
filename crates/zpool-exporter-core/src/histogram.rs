//! Histogram table parser.
//!
//! Parses the `zpool iostat -w -p -H` / `zpool iostat -r -p -H` shape:
//! blocks separated by a blank line, one block per pool. Line 1 of a block
//! is the pool name; every following line is one bucket row whose field 0 is
//! the bucket boundary and whose fields 1..N hold that bucket's value for
//! each series in registry order.
//!
//! The block is transposed from row-per-bucket into row-per-series. zpool
//! omits trailing empty cells on some rows, so rows are padded to the widest
//! row in the block with NaN during transposition; that keeps every series
//! aligned to the full bucket sequence instead of silently shifting values.

use crate::convert;
use crate::kind::MetricKind;

/// One (pool, kind) bucket distribution from a single scrape.
///
/// `buckets` and `values` always have equal length; bucket order is exactly
/// the source table's row order, never sorted here.
#[derive(Debug, Clone)]
pub struct HistogramRecord {
    pub pool: String,
    pub buckets: Vec<f64>,
    pub values: Vec<f64>,
}

/// All records of one histogram kind from a single scrape.
#[derive(Debug, Clone)]
pub struct HistogramSeries {
    pub kind: &'static MetricKind,
    pub records: Vec<HistogramRecord>,
}

/// Parse histogram output into one series per registry kind.
///
/// Blocks are processed independently. A block with fewer value columns than
/// registered kinds truncates its own zip: kinds past the available columns
/// produce no record for that pool and are absent (not zero) from the
/// scrape. Empty input yields an empty list.
pub fn parse(data: &str, kinds: &[&'static MetricKind]) -> Vec<HistogramSeries> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut series: Vec<HistogramSeries> = kinds
        .iter()
        .map(|kind| HistogramSeries {
            kind: *kind,
            records: Vec::new(),
        })
        .collect();

    for block in data.split("\n\n") {
        let mut lines = block.lines();
        let Some(pool) = lines.next() else {
            continue;
        };
        let rows: Vec<Vec<&str>> = lines.map(|line| line.split('\t').collect()).collect();
        if rows.is_empty() {
            continue;
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        // Transposed row 0 is the bucket boundary column; transposed row
        // j+1 is series j. Truncates when the block is narrower than the
        // registry.
        for (j, s) in series.iter_mut().enumerate() {
            if j + 1 >= width {
                break;
            }
            let buckets = rows
                .iter()
                .map(|row| convert::bucket_bound(s.kind, pool, row.first().copied().unwrap_or("")))
                .collect();
            let values = rows
                .iter()
                .map(|row| convert::histogram_cell(s.kind, pool, row.get(j + 1).copied()))
                .collect();
            s.records.push(HistogramRecord {
                pool: pool.to_string(),
                buckets,
                values,
            });
        }
    }

    series
}
