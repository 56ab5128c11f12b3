//! Scalar table parser.
//!
//! Parses the `zpool list -H -p` / `zpool iostat -H -p` shape: one line per
//! pool, tab-separated fields, the pool name in field 0. Column `i` past the
//! name is zipped against registry position `i`; there is no header to cross
//! check against, the registry order is the contract.

use crate::convert;
use crate::kind::MetricKind;

/// One (pool, kind) data point from a single scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarRecord {
    pub pool: String,
    /// `None` is the missing value: sentinel `-`, absent field, unparsable
    /// text, or an unmapped health state.
    pub value: Option<f64>,
}

/// All records of one metric kind from a single scrape.
#[derive(Debug, Clone)]
pub struct ScalarSeries {
    pub kind: &'static MetricKind,
    pub records: Vec<ScalarRecord>,
}

/// Parse a scalar table into one series per registry kind.
///
/// Empty input (no pools matched) yields an empty list, not an error. A line
/// with fewer fields than the registry declares produces missing values for
/// its absent trailing fields without affecting other lines.
pub fn parse(data: &str, kinds: &[&'static MetricKind]) -> Vec<ScalarSeries> {
    if data.is_empty() {
        return Vec::new();
    }

    let rows: Vec<Vec<&str>> = data.lines().map(|line| line.split('\t').collect()).collect();

    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let records = rows
                .iter()
                .map(|fields| {
                    let pool = fields.first().copied().unwrap_or_default();
                    ScalarRecord {
                        pool: pool.to_string(),
                        value: convert::scalar_value(kind, pool, fields.get(i + 1).copied()),
                    }
                })
                .collect();
            ScalarSeries {
                kind: *kind,
                records,
            }
        })
        .collect()
}
