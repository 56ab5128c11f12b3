//! Static metric kind registry.
//!
//! One ordered table per `zpool` output shape. Column order in each table
//! matches the external command's fixed output-column order exactly: that is
//! the primary correctness contract with `zpool`, which emits no header in
//! scripted mode (`-H`). The lengths are pinned by tests against golden
//! samples of the tool's output; if a zpool release changes its columns, the
//! tests fail loudly instead of the exporter mislabeling values at runtime.

use crate::kind::BucketUnit::{Bytes, Nanoseconds};
use crate::kind::Conversion::{Float, HistogramBuckets, Int, Ratio, State, TimeNanos};
use crate::kind::Exposition::{Counter, Gauge, Histogram};
use crate::kind::MetricKind;

macro_rules! kind {
    ($name:literal, $help:literal, $exposition:expr, $conversion:expr) => {
        MetricKind {
            name: $name,
            help: $help,
            exposition: $exposition,
            conversion: $conversion,
        }
    };
}

/// Data columns of `zpool list -H -p`, after the pool name. The trailing
/// `altroot` property is not part of the listing's numeric columns.
pub static POOL_LIST: &[MetricKind] = &[
    kind!("zpool_iostat_size_bytes", "Byte size of a pool", Gauge, Int),
    kind!("zpool_iostat_allocated_bytes", "Bytes allocated in a pool", Gauge, Int),
    kind!("zpool_iostat_free_bytes", "Bytes free in a pool", Gauge, Int),
    kind!(
        "zpool_iostat_checkpoint_bytes",
        "Bytes allocated to a checkpoint in a pool",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_expandsize_bytes",
        "Unused capacity that can be expanded into when resizing disks",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_fragmentation_ratio",
        "Ratio of fragmentation of the free space in a pool",
        Gauge,
        Ratio
    ),
    kind!(
        "zpool_iostat_capacity_ratio",
        "Capacity of a pool expressed as a ratio of allocated_bytes:size_bytes",
        Gauge,
        Ratio
    ),
    kind!(
        "zpool_iostat_dedup_ratio",
        "Indicator of how much deduplication has occurred as a ratio of referenced-bytes:logical-bytes",
        Gauge,
        Float
    ),
    kind!(
        "zpool_iostat_health_info",
        "Pool health (0=ONLINE, 1=DEGRADED, 2=FAULTED, 3=OFFLINE, 4=UNAVAIL, 5=REMOVED)",
        Gauge,
        State
    ),
];

/// Data columns of `zpool iostat -H -p` without extension flags.
pub static IOSTAT_BASE: &[MetricKind] = &[
    kind!(
        "zpool_iostat_capacity_allocated_bytes",
        "Amount of data currently stored in the pool",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_capacity_free_bytes",
        "Amount of disk space available in the pool",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_operations_read_count",
        "Number of read I/O operations sent to the pool, including metadata requests",
        Counter,
        Int
    ),
    kind!(
        "zpool_iostat_operations_write_count",
        "Number of write I/O operations sent to the pool",
        Counter,
        Int
    ),
    kind!(
        "zpool_iostat_bandwidth_read_count",
        "Bandwidth of all read operations (including metadata) as units per second",
        Counter,
        Int
    ),
    kind!(
        "zpool_iostat_bandwidth_write_count",
        "Bandwidth of all write operations as units per second",
        Counter,
        Int
    ),
];

/// Average latency columns appended by `zpool iostat -l`.
pub static IOSTAT_LATENCY: &[MetricKind] = &[
    kind!(
        "zpool_iostat_total_wait_read_seconds",
        "Average total read I/O time (queuing + disk I/O time)",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_total_wait_write_seconds",
        "Average total write I/O time (queuing + disk I/O time)",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_disk_wait_read_seconds",
        "Average disk read I/O time (time reading the disk)",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_disk_wait_write_seconds",
        "Average disk write I/O time (time writing to the disk)",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_syncq_wait_read_seconds",
        "Average amount of time read I/O spent in synchronous priority queues. Does not include disk time",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_syncq_wait_write_seconds",
        "Average amount of time write I/O spent in synchronous priority queues. Does not include disk time",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_asyncq_wait_read_seconds",
        "Average amount of time read I/O spent in asynchronous priority queues. Does not include disk time",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_asyncq_wait_write_seconds",
        "Average amount of time write I/O spent in asynchronous priority queues. Does not include disk time",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_scrub_seconds",
        "Average queuing time in scrub queue. Does not include disk time",
        Gauge,
        TimeNanos
    ),
    kind!(
        "zpool_iostat_trim_seconds",
        "Average queuing time in trim queue. Does not include disk time",
        Gauge,
        TimeNanos
    ),
];

/// Queue depth columns appended by `zpool iostat -q`.
pub static IOSTAT_QUEUE: &[MetricKind] = &[
    kind!(
        "zpool_iostat_syncq_read_pending_count",
        "Current number of pending read entries in synchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_syncq_read_active_count",
        "Current number of active read entries in synchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_syncq_write_pending_count",
        "Current number of pending write entries in synchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_syncq_write_active_count",
        "Current number of active write entries in synchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_asyncq_read_pending_count",
        "Current number of pending read entries in asynchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_asyncq_read_active_count",
        "Current number of active read entries in asynchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_asyncq_write_pending_count",
        "Current number of pending write entries in asynchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_asyncq_write_active_count",
        "Current number of active write entries in asynchronous priority queues",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_scrubq_pending_count",
        "Current number of pending entries in scrub queue",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_scrubq_active_count",
        "Current number of active entries in scrub queue",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_trimq_pending_count",
        "Current number of pending entries in trim queue",
        Gauge,
        Int
    ),
    kind!(
        "zpool_iostat_trimq_active_count",
        "Current number of active entries in trim queue",
        Gauge,
        Int
    ),
];

/// Series of `zpool iostat -w -p -H` (latency histograms), in column order.
/// Bucket boundaries are nanoseconds, exposed in seconds.
pub static LATENCY_HISTOGRAM: &[MetricKind] = &[
    kind!(
        "zpool_iostat_latency_total_wait_read_seconds",
        "Histogram of total read I/O time (queuing + disk I/O time)",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_total_wait_write_seconds",
        "Histogram of total write I/O time (queuing + disk I/O time)",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_disk_wait_read_seconds",
        "Histogram of disk read I/O time (time reading the disk)",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_disk_wait_write_seconds",
        "Histogram of disk write I/O time (time writing to the disk)",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_syncq_wait_read_seconds",
        "Histogram of read I/O time spent in synchronous priority queues. Does not include disk time",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_syncq_wait_write_seconds",
        "Histogram of write I/O time spent in synchronous priority queues. Does not include disk time",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_asyncq_wait_read_seconds",
        "Histogram of read I/O time spent in asynchronous priority queues. Does not include disk time",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_asyncq_wait_write_seconds",
        "Histogram of write I/O time spent in asynchronous priority queues. Does not include disk time",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_scrub_seconds",
        "Histogram of queuing time in scrub queue. Does not include disk time",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
    kind!(
        "zpool_iostat_latency_trim_seconds",
        "Histogram of queuing time in trim queue. Does not include disk time",
        Histogram,
        HistogramBuckets(Nanoseconds)
    ),
];

/// Series of `zpool iostat -r -p -H` (request size histograms for leaf vdev
/// I/O), in column order. Bucket boundaries are bytes.
pub static REQUEST_SIZE_HISTOGRAM: &[MetricKind] = &[
    kind!(
        "zpool_iostat_request_size_sync_read_individual_bytes",
        "Histogram of individual I/O sizes for synchronous reads",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_sync_read_aggregate_bytes",
        "Histogram of aggregate I/O sizes for synchronous reads",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_sync_write_individual_bytes",
        "Histogram of individual I/O sizes for synchronous writes",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_sync_write_aggregate_bytes",
        "Histogram of aggregate I/O sizes for synchronous writes",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_async_read_individual_bytes",
        "Histogram of individual I/O sizes for asynchronous reads",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_async_read_aggregate_bytes",
        "Histogram of aggregate I/O sizes for asynchronous reads",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_async_write_individual_bytes",
        "Histogram of individual I/O sizes for asynchronous writes",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_async_write_aggregate_bytes",
        "Histogram of aggregate I/O sizes for asynchronous writes",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_scrub_individual_bytes",
        "Histogram of individual I/O sizes for scrub I/O",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_scrub_aggregate_bytes",
        "Histogram of aggregate I/O sizes for scrub I/O",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_trim_individual_bytes",
        "Histogram of individual I/O sizes for trim I/O",
        Histogram,
        HistogramBuckets(Bytes)
    ),
    kind!(
        "zpool_iostat_request_size_trim_aggregate_bytes",
        "Histogram of aggregate I/O sizes for trim I/O",
        Histogram,
        HistogramBuckets(Bytes)
    ),
];

/// Ordered kind list for `zpool iostat -H -p`, extended per flag.
///
/// `-l` appends the latency columns, `-q` the queue depth columns; zpool
/// emits them in exactly this order when both flags are present.
pub fn iostat_kinds(latency: bool, queue: bool) -> Vec<&'static MetricKind> {
    let mut kinds: Vec<&'static MetricKind> = IOSTAT_BASE.iter().collect();
    if latency {
        kinds.extend(IOSTAT_LATENCY.iter());
    }
    if queue {
        kinds.extend(IOSTAT_QUEUE.iter());
    }
    kinds
}
