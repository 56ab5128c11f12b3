//! Scrape collector.
//!
//! Composes the fixed `zpool` invocations selected by configuration, feeds
//! their output through the table parsers, and assembles the result into
//! exposition-ready metric families. Each scrape builds all of its state
//! fresh; nothing is cached or retained between scrapes, so concurrent
//! scrapes only share the static registry.

use std::time::{Duration, Instant};

use crate::histogram::{self, HistogramSeries};
use crate::kind::MetricKind;
use crate::registry;
use crate::runner::{CommandRunner, RunError};
use crate::scalar::{self, ScalarSeries};

/// Which tables a scrape collects, fixed at startup from the CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ExporterOptions {
    /// Pools to include; empty means every imported pool.
    pub pools: Vec<String>,
    /// Extend the I/O statistics with average latency columns (`-l`).
    pub latency: bool,
    /// Extend the I/O statistics with queue depth columns (`-q`).
    pub queue: bool,
    /// Collect latency histograms (`-w`).
    pub latency_histogram: bool,
    /// Collect request size histograms (`-r`).
    pub request_size_histogram: bool,
}

/// One assembled metric family: every record of one kind from one scrape.
#[derive(Debug, Clone)]
pub enum Family {
    Scalar(ScalarSeries),
    Histogram(HistogramSeries),
}

impl Family {
    pub fn kind(&self) -> &'static MetricKind {
        match self {
            Self::Scalar(s) => s.kind,
            Self::Histogram(s) => s.kind,
        }
    }
}

/// Result of one scrape pass.
#[derive(Debug)]
pub struct Scrape {
    pub families: Vec<Family>,
    /// Tables whose invocation failed; their kinds are absent from
    /// `families` while every table that succeeded is still present.
    pub failed_tables: usize,
    pub elapsed: Duration,
}

/// Collects pool statistics through a [`CommandRunner`].
pub struct PoolCollector<R: CommandRunner> {
    options: ExporterOptions,
    runner: R,
}

impl<R: CommandRunner> PoolCollector<R> {
    pub fn new(options: ExporterOptions, runner: R) -> Self {
        Self { options, runner }
    }

    pub fn options(&self) -> &ExporterOptions {
        &self.options
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fixed base argv plus the optional pool filter. The flag composition
    /// is a verbatim contract with zpool: `-H` scripted mode and `-p` exact
    /// values are what make the column order and field syntax stable.
    fn argv(&self, base: &[&str]) -> Vec<String> {
        base.iter()
            .map(ToString::to_string)
            .chain(self.options.pools.iter().cloned())
            .collect()
    }

    /// `zpool list -H -p`: pool summary with health and space usage.
    pub fn zpool_list(&self) -> Result<Vec<ScalarSeries>, RunError> {
        let output = self.runner.run(&self.argv(&["zpool", "list", "-H", "-p"]))?;
        let kinds: Vec<&'static MetricKind> = registry::POOL_LIST.iter().collect();
        Ok(scalar::parse(&output, &kinds))
    }

    /// `zpool iostat -H -p [-l] [-q]`: I/O statistics, extended per flag.
    pub fn zpool_iostat(&self) -> Result<Vec<ScalarSeries>, RunError> {
        let mut base = vec!["zpool", "iostat", "-H", "-p"];
        if self.options.latency {
            base.push("-l");
        }
        if self.options.queue {
            base.push("-q");
        }
        let output = self.runner.run(&self.argv(&base))?;
        let kinds = registry::iostat_kinds(self.options.latency, self.options.queue);
        Ok(scalar::parse(&output, &kinds))
    }

    /// `zpool iostat -w -p -H`: latency histograms.
    pub fn zpool_iostat_latency_histogram(&self) -> Result<Vec<HistogramSeries>, RunError> {
        let output = self
            .runner
            .run(&self.argv(&["zpool", "iostat", "-w", "-p", "-H"]))?;
        let kinds: Vec<&'static MetricKind> = registry::LATENCY_HISTOGRAM.iter().collect();
        Ok(histogram::parse(&output, &kinds))
    }

    /// `zpool iostat -r -p -H`: request size histograms for leaf vdev I/O.
    pub fn zpool_iostat_request_size_histogram(&self) -> Result<Vec<HistogramSeries>, RunError> {
        let output = self
            .runner
            .run(&self.argv(&["zpool", "iostat", "-r", "-p", "-H"]))?;
        let kinds: Vec<&'static MetricKind> = registry::REQUEST_SIZE_HISTOGRAM.iter().collect();
        Ok(histogram::parse(&output, &kinds))
    }

    /// Run every configured table once and assemble the families.
    ///
    /// A failed table is logged and skipped; the remaining tables still
    /// expose their families, so one bad invocation never blanks the whole
    /// scrape.
    pub fn collect(&self) -> Scrape {
        let start = Instant::now();
        let mut families = Vec::new();
        let mut failed_tables = 0;

        match self.zpool_list() {
            Ok(series) => families.extend(series.into_iter().map(Family::Scalar)),
            Err(err) => {
                log::error!("{err}");
                failed_tables += 1;
            }
        }

        match self.zpool_iostat() {
            Ok(series) => families.extend(series.into_iter().map(Family::Scalar)),
            Err(err) => {
                log::error!("{err}");
                failed_tables += 1;
            }
        }

        if self.options.latency_histogram {
            match self.zpool_iostat_latency_histogram() {
                Ok(series) => families.extend(series.into_iter().map(Family::Histogram)),
                Err(err) => {
                    log::error!("{err}");
                    failed_tables += 1;
                }
            }
        }

        if self.options.request_size_histogram {
            match self.zpool_iostat_request_size_histogram() {
                Ok(series) => families.extend(series.into_iter().map(Family::Histogram)),
                Err(err) => {
                    log::error!("{err}");
                    failed_tables += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        log::debug!(
            "scrape assembled {} families in {:?} ({} table(s) failed)",
            families.len(),
            elapsed,
            failed_tables
        );

        Scrape {
            families,
            failed_tables,
            elapsed,
        }
    }
}
