//! Prometheus text-format rendering for assembled metric families.
//!
//! zpool histograms are exposed exactly as parsed: per-bucket counts in
//! source order, NaN padding included. Generic client encoders model
//! histogram buckets as cumulative integer counts and cannot carry NaN
//! cells, so the families are written in the text format directly.

use zpool_exporter_core::collector::Family;
use zpool_exporter_core::histogram::HistogramSeries;
use zpool_exporter_core::kind::MetricKind;
use zpool_exporter_core::scalar::ScalarSeries;

/// Render one scrape's families into exposition text.
pub fn render(families: &[Family]) -> String {
    let mut out = String::new();
    for family in families {
        match family {
            Family::Scalar(series) => scalar_family(&mut out, series),
            Family::Histogram(series) => histogram_family(&mut out, series),
        }
    }
    out
}

/// Escape a label value per the exposition format.
fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn header(out: &mut String, kind: &MetricKind) {
    out.push_str(&format!("# HELP {} {}\n", kind.name, kind.help));
    out.push_str(&format!("# TYPE {} {}\n", kind.name, kind.exposition));
}

fn scalar_family(out: &mut String, series: &ScalarSeries) {
    header(out, series.kind);
    for record in &series.records {
        // Missing values are omitted, not exported as zero.
        let Some(value) = record.value else { continue };
        out.push_str(&format!(
            "{}{{pool=\"{}\"}} {}\n",
            series.kind.name,
            escape_label(&record.pool),
            value
        ));
    }
}

fn histogram_family(out: &mut String, series: &HistogramSeries) {
    header(out, series.kind);
    for record in &series.records {
        if record.values.is_empty() {
            continue;
        }
        let pool = escape_label(&record.pool);
        for (bucket, value) in record.buckets.iter().zip(&record.values) {
            out.push_str(&format!(
                "{}_bucket{{pool=\"{pool}\",le=\"{bucket}\"}} {value}\n",
                series.kind.name
            ));
        }
        let sum: f64 = record.values.iter().sum();
        out.push_str(&format!("{}_sum{{pool=\"{pool}\"}} {sum}\n", series.kind.name));
        // The count sample mirrors the final bucket, as the source table
        // supplies no separate total.
        let count = record.values.last().copied().unwrap_or(0.0);
        out.push_str(&format!("{}_count{{pool=\"{pool}\"}} {count}\n", series.kind.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpool_exporter_core::histogram::HistogramRecord;
    use zpool_exporter_core::registry;
    use zpool_exporter_core::scalar::ScalarRecord;

    fn scalar_fixture() -> Family {
        Family::Scalar(ScalarSeries {
            kind: &registry::POOL_LIST[0],
            records: vec![
                ScalarRecord {
                    pool: "tank".to_string(),
                    value: Some(1000.0),
                },
                ScalarRecord {
                    pool: "backup".to_string(),
                    value: None,
                },
            ],
        })
    }

    #[test]
    fn test_scalar_family_renders_help_type_and_samples() {
        let text = render(&[scalar_fixture()]);
        assert!(text.contains("# HELP zpool_iostat_size_bytes Byte size of a pool\n"));
        assert!(text.contains("# TYPE zpool_iostat_size_bytes gauge\n"));
        assert!(text.contains("zpool_iostat_size_bytes{pool=\"tank\"} 1000\n"));
    }

    #[test]
    fn test_missing_records_are_omitted() {
        let text = render(&[scalar_fixture()]);
        assert!(!text.contains("backup"));
    }

    #[test]
    fn test_counter_kind_renders_counter_type() {
        let family = Family::Scalar(ScalarSeries {
            kind: &registry::IOSTAT_BASE[2],
            records: vec![ScalarRecord {
                pool: "tank".to_string(),
                value: Some(12.0),
            }],
        });
        let text = render(&[family]);
        assert!(text.contains("# TYPE zpool_iostat_operations_read_count counter\n"));
        assert!(text.contains("zpool_iostat_operations_read_count{pool=\"tank\"} 12\n"));
    }

    #[test]
    fn test_histogram_family_renders_buckets_sum_and_count() {
        let family = Family::Histogram(HistogramSeries {
            kind: &registry::LATENCY_HISTOGRAM[0],
            records: vec![HistogramRecord {
                pool: "tank".to_string(),
                buckets: vec![0.01, 0.02],
                values: vec![5.0, 3.0],
            }],
        });
        let text = render(&[family]);
        let name = "zpool_iostat_latency_total_wait_read_seconds";
        assert!(text.contains(&format!("# TYPE {name} histogram\n")));
        assert!(text.contains(&format!("{name}_bucket{{pool=\"tank\",le=\"0.01\"}} 5\n")));
        assert!(text.contains(&format!("{name}_bucket{{pool=\"tank\",le=\"0.02\"}} 3\n")));
        assert!(text.contains(&format!("{name}_sum{{pool=\"tank\"}} 8\n")));
        assert!(text.contains(&format!("{name}_count{{pool=\"tank\"}} 3\n")));
    }

    #[test]
    fn test_nan_padding_survives_into_exposition() {
        let family = Family::Histogram(HistogramSeries {
            kind: &registry::LATENCY_HISTOGRAM[1],
            records: vec![HistogramRecord {
                pool: "tank".to_string(),
                buckets: vec![0.01, 0.02],
                values: vec![2.0, f64::NAN],
            }],
        });
        let text = render(&[family]);
        assert!(text.contains("le=\"0.02\"} NaN\n"));
        // NaN propagates into the sum, as the source data is incomplete.
        assert!(text.contains("_sum{pool=\"tank\"} NaN\n"));
    }

    #[test]
    fn test_label_values_are_escaped() {
        let family = Family::Scalar(ScalarSeries {
            kind: &registry::POOL_LIST[0],
            records: vec![ScalarRecord {
                pool: "ta\"nk".to_string(),
                value: Some(1.0),
            }],
        });
        let text = render(&[family]);
        assert!(text.contains("pool=\"ta\\\"nk\""));
    }

    #[test]
    fn test_empty_scrape_renders_empty_body() {
        assert!(render(&[]).is_empty());
    }
}
