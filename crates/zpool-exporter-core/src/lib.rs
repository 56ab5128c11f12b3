//! # zpool-exporter-core
//!
//! Parsing and type-conversion engine for ZFS pool statistics.
//!
//! The exporter shells out to `zpool` in scripted mode (`-H -p`), so the
//! whole correctness story lives in three places: the static registry of
//! metric kinds whose order mirrors zpool's fixed output columns, the table
//! parsers that zip raw tab-delimited fields against that registry, and the
//! conversion layer that turns text into unit-correct numeric values while
//! degrading malformed or missing data to a documented missing state.
//!
//! ## Quick start
//!
//! ```no_run
//! use zpool_exporter_core::collector::{ExporterOptions, PoolCollector};
//! use zpool_exporter_core::runner::ZpoolRunner;
//!
//! let collector = PoolCollector::new(ExporterOptions::default(), ZpoolRunner::new());
//! let scrape = collector.collect();
//! for family in &scrape.families {
//!     println!("{}: exposed", family.kind().name);
//! }
//! ```
//!
//! ## Architecture
//!
//! Command runner → table parser (scalar or histogram) → value conversion →
//! assembled metric families → text exposition (server crate).
//!
//! Scrapes share no mutable state: each [`collector::PoolCollector::collect`]
//! call builds everything fresh and the registry is read-only, so concurrent
//! scrapes need no locking.

pub mod collector;
pub mod convert;
pub mod histogram;
pub mod kind;
pub mod registry;
pub mod runner;
pub mod scalar;

pub use collector::{ExporterOptions, Family, PoolCollector, Scrape};
pub use histogram::{HistogramRecord, HistogramSeries};
pub use kind::{BucketUnit, Conversion, Exposition, MetricKind};
pub use runner::{CommandRunner, RunError, ZpoolRunner};
pub use scalar::{ScalarRecord, ScalarSeries};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port of the scrape endpoint.
pub const DEFAULT_PORT: u16 = 10007;
