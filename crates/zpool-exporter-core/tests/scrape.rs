//! End-to-end scrape tests: mock command runner → parsers → assembled
//! families, over golden samples of zpool's scripted output.

use std::collections::HashMap;
use std::sync::Mutex;

use zpool_exporter_core::collector::{ExporterOptions, Family, PoolCollector};
use zpool_exporter_core::runner::{CommandRunner, RunError};

/// Canned-output runner keyed by the joined argv. Records every invocation
/// so tests can assert the exact flag composition sent to zpool.
struct MockRunner {
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn respond(mut self, command: &str, output: &str) -> Self {
        self.responses.insert(command.to_string(), Ok(output.to_string()));
        self
    }

    fn fail(mut self, command: &str, stderr: &str) -> Self {
        self.responses.insert(command.to_string(), Err(stderr.to_string()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, argv: &[String]) -> Result<String, RunError> {
        let command = argv.join(" ");
        self.calls.lock().unwrap().push(command.clone());
        match self.responses.get(&command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(stderr)) => Err(RunError::Failed {
                command,
                message: stderr.clone(),
            }),
            None => Err(RunError::Failed {
                command,
                message: "unexpected invocation".to_string(),
            }),
        }
    }
}

const LIST_OUTPUT: &str =
    "tank\t1000\t500\t500\t0\t0\t0.10\t0.50\t1.00\tONLINE\n\
     backup\t2000\t100\t1900\t-\t-\t3\t5\t1.00\tDEGRADED";

const IOSTAT_BASE_OUTPUT: &str = "tank\t500\t500\t12\t34\t1024\t2048\n\
                                  backup\t100\t1900\t1\t2\t64\t128";

/// Latency histogram block: one row per bucket, boundary first, then one
/// value per series (ten series for `zpool iostat -w`).
fn latency_histogram_output() -> String {
    let mut out = String::from("tank");
    for (bucket, base) in [("0", 0), ("10000000", 10), ("1000000000", 20)] {
        out.push('\n');
        out.push_str(bucket);
        for v in 0..10 {
            out.push_str(&format!("\t{}", base + v));
        }
    }
    out
}

fn request_size_histogram_output() -> String {
    let mut out = String::from("tank");
    for bucket in ["512", "4096", "131072"] {
        out.push('\n');
        out.push_str(bucket);
        for v in 0..12 {
            out.push_str(&format!("\t{v}"));
        }
    }
    out
}

fn scalar_value(families: &[Family], name: &str, pool: &str) -> Option<f64> {
    families.iter().find_map(|family| match family {
        Family::Scalar(s) if s.kind.name == name => {
            s.records.iter().find(|r| r.pool == pool).and_then(|r| r.value)
        }
        _ => None,
    })
}

#[test]
fn full_scrape_assembles_every_configured_family() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p", LIST_OUTPUT)
        .respond(
            "zpool iostat -H -p -l -q",
            "tank\t500\t500\t12\t34\t1024\t2048\t100\t200\t50\t60\t10\t20\t30\t40\t5\t6\
             \t0\t1\t2\t3\t4\t5\t6\t7\t8\t9\t10\t11",
        )
        .respond("zpool iostat -w -p -H", &latency_histogram_output())
        .respond("zpool iostat -r -p -H", &request_size_histogram_output());

    let options = ExporterOptions {
        latency: true,
        queue: true,
        latency_histogram: true,
        request_size_histogram: true,
        ..ExporterOptions::default()
    };
    let scrape = PoolCollector::new(options, runner).collect();

    assert_eq!(scrape.failed_tables, 0);
    // 9 pool summary + 28 extended iostat + 10 latency + 12 request size.
    assert_eq!(scrape.families.len(), 59);
}

#[test]
fn scrape_reproduces_zpool_flag_composition() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p", "")
        .respond("zpool iostat -H -p -l", "")
        .respond("zpool iostat -w -p -H", "");

    let options = ExporterOptions {
        latency: true,
        latency_histogram: true,
        ..ExporterOptions::default()
    };
    let collector = PoolCollector::new(options, runner);
    let scrape = collector.collect();
    assert_eq!(scrape.failed_tables, 0);

    assert_eq!(
        collector.runner().calls(),
        vec![
            "zpool list -H -p".to_string(),
            "zpool iostat -H -p -l".to_string(),
            "zpool iostat -w -p -H".to_string(),
        ]
    );
}

#[test]
fn pool_filter_is_appended_to_every_invocation() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p tank backup", LIST_OUTPUT)
        .respond("zpool iostat -H -p tank backup", IOSTAT_BASE_OUTPUT);

    let options = ExporterOptions {
        pools: vec!["tank".to_string(), "backup".to_string()],
        ..ExporterOptions::default()
    };
    let scrape = PoolCollector::new(options, runner).collect();

    assert_eq!(scrape.failed_tables, 0);
    assert_eq!(scrape.families.len(), 15);
}

#[test]
fn scrape_converts_pool_summary_values() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p", LIST_OUTPUT)
        .respond("zpool iostat -H -p", IOSTAT_BASE_OUTPUT);

    let scrape = PoolCollector::new(ExporterOptions::default(), runner).collect();

    assert_eq!(scalar_value(&scrape.families, "zpool_iostat_size_bytes", "tank"), Some(1000.0));
    assert_eq!(
        scalar_value(&scrape.families, "zpool_iostat_fragmentation_ratio", "tank"),
        Some(0.001)
    );
    assert_eq!(scalar_value(&scrape.families, "zpool_iostat_health_info", "tank"), Some(0.0));
    assert_eq!(
        scalar_value(&scrape.families, "zpool_iostat_health_info", "backup"),
        Some(1.0)
    );
    // backup has no checkpoint: sentinel stays missing.
    assert_eq!(
        scalar_value(&scrape.families, "zpool_iostat_checkpoint_bytes", "backup"),
        None
    );
    assert_eq!(
        scalar_value(&scrape.families, "zpool_iostat_operations_write_count", "tank"),
        Some(34.0)
    );
}

#[test]
fn scrape_transposes_latency_histograms() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p", "")
        .respond("zpool iostat -H -p", "")
        .respond("zpool iostat -w -p -H", &latency_histogram_output());

    let options = ExporterOptions {
        latency_histogram: true,
        ..ExporterOptions::default()
    };
    let scrape = PoolCollector::new(options, runner).collect();

    let record = scrape
        .families
        .iter()
        .find_map(|family| match family {
            Family::Histogram(s)
                if s.kind.name == "zpool_iostat_latency_total_wait_read_seconds" =>
            {
                s.records.first()
            }
            _ => None,
        })
        .expect("latency histogram record");

    assert_eq!(record.pool, "tank");
    assert_eq!(record.buckets, vec![0.0, 0.01, 1.0]);
    assert_eq!(record.values, vec![0.0, 10.0, 20.0]);
}

#[test]
fn failed_table_leaves_other_tables_exposed() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p", LIST_OUTPUT)
        .fail("zpool iostat -H -p", "invalid option");

    let scrape = PoolCollector::new(ExporterOptions::default(), runner).collect();

    assert_eq!(scrape.failed_tables, 1);
    // The pool summary families survive the iostat failure.
    assert_eq!(scrape.families.len(), 9);
    assert_eq!(scalar_value(&scrape.families, "zpool_iostat_size_bytes", "tank"), Some(1000.0));
}

#[test]
fn empty_output_is_a_valid_scrape_with_no_families() {
    let runner = MockRunner::new()
        .respond("zpool list -H -p", "")
        .respond("zpool iostat -H -p", "");

    let scrape = PoolCollector::new(ExporterOptions::default(), runner).collect();

    assert_eq!(scrape.failed_tables, 0);
    assert!(scrape.families.is_empty());
}
